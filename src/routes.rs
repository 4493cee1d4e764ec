/// The in-browser navigation surface: every path the client routes between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    News,
    Topics,
    Topic(String),
    Community,
}

impl Route {
    /// Parse a path into a route. Unknown paths return `None`; the caller
    /// renders its not-found view rather than crashing. A trailing slash is
    /// tolerated.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);
        match trimmed {
            "/" | "" => Some(Route::Home),
            "/news" => Some(Route::News),
            "/code" => Some(Route::Topics),
            "/community" => Some(Route::Community),
            _ => {
                let topic_id = trimmed.strip_prefix("/topic/")?;
                if topic_id.is_empty() || topic_id.contains('/') {
                    return None;
                }
                Some(Route::Topic(topic_id.to_string()))
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::News => "/news".to_string(),
            Route::Topics => "/code".to_string(),
            Route::Topic(id) => format!("/topic/{id}"),
            Route::Community => "/community".to_string(),
        }
    }
}
