//! Row query builder rendering PostgREST paths.

use urlencoding::encode;

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    select: String,
    filters: Vec<(String, String)>,
    order: Vec<(String, bool)>,
    limit: Option<u32>,
}

impl Query {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    /// Columns and nested selects, e.g. `*, songs(*)`. Whitespace is dropped.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.chars().filter(|c| !c.is_whitespace()).collect();
        self
    }

    pub fn eq(mut self, column: &str, value: impl AsRef<str>) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", encode(value.as_ref()))));
        self
    }

    pub fn in_list<S: AsRef<str>>(mut self, column: &str, values: &[S]) -> Self {
        let joined = values
            .iter()
            .map(|v| encode(v.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        self.filters
            .push((column.to_string(), format!("in.({joined})")));
        self
    }

    /// Case-insensitive substring match.
    pub fn ilike(mut self, column: &str, needle: &str) -> Self {
        self.filters.push((
            column.to_string(),
            format!("ilike.{}", encode(&format!("*{needle}*"))),
        ));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order.push((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filters only, for update/delete requests.
    pub fn filter_path(&self) -> String {
        let filters = self
            .filters
            .iter()
            .map(|(column, expr)| format!("{column}={expr}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{filters}", self.table)
    }

    /// Full read path relative to the rest endpoint.
    pub fn to_path(&self) -> String {
        let mut parts = vec![format!("select={}", self.select)];
        for (column, expr) in &self.filters {
            parts.push(format!("{column}={expr}"));
        }
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(column, asc)| {
                    format!("{column}.{}", if *asc { "asc" } else { "desc" })
                })
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("order={order}"));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={limit}"));
        }
        format!("{}?{}", self.table, parts.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_recent_songs_query() {
        let query = Query::from("songs")
            .order("created_at", false)
            .limit(6);
        assert_eq!(
            query.to_path(),
            "songs?select=*&order=created_at.desc&limit=6"
        );
    }

    #[test]
    fn renders_nested_select_with_filters() {
        let query = Query::from("playlist_songs")
            .select(
                r#"
                *,
                songs(*)
            "#,
            )
            .eq("playlist_id", "abc-123")
            .order("position", true);
        assert_eq!(
            query.to_path(),
            "playlist_songs?select=*,songs(*)&playlist_id=eq.abc-123&order=position.asc"
        );
    }

    #[test]
    fn encodes_filter_values() {
        let query = Query::from("user_likes")
            .eq("user_id", "u 1")
            .eq("song_id", "a&b");
        assert_eq!(
            query.filter_path(),
            "user_likes?user_id=eq.u%201&song_id=eq.a%26b"
        );
    }

    #[test]
    fn renders_in_and_ilike() {
        let query = Query::from("songs")
            .select("id")
            .in_list("id", &["a", "b"])
            .ilike("title", "blue");
        assert_eq!(
            query.to_path(),
            "songs?select=id&id=in.(a,b)&title=ilike.%2Ablue%2A"
        );
    }

    #[test]
    fn filter_path_without_filters_is_bare_table() {
        assert_eq!(Query::from("profiles").filter_path(), "profiles?");
    }
}
