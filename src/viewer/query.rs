use url::form_urlencoded;

/// The `comic` and `chapter` parameters of a viewer URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerQuery {
    pub comic: Option<String>,
    pub chapter: Option<String>,
}

impl ViewerQuery {
    pub fn new(comic: impl Into<String>, chapter: Option<String>) -> Self {
        ViewerQuery {
            comic: Some(comic.into()),
            chapter,
        }
    }

    /// Parse a query string, with or without the leading `?`.
    ///
    /// Empty values count as absent; for repeated keys the first one wins.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = ViewerQuery::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "comic" if parsed.comic.is_none() => parsed.comic = Some(value.into_owned()),
                "chapter" if parsed.chapter.is_none() => parsed.chapter = Some(value.into_owned()),
                _ => {}
            }
        }
        parsed
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(comic) = &self.comic {
            serializer.append_pair("comic", comic);
        }
        if let Some(chapter) = &self.chapter {
            serializer.append_pair("chapter", chapter);
        }
        serializer.finish()
    }
}
