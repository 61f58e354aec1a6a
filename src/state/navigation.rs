//! Screen routing
//!
//! A route is a plain string, `details/<payload>`, where the payload is the
//! selected movie encoded as URL-safe JSON.

use super::data::Movie;

const DETAILS_PREFIX: &str = "details";
const HOME_ROUTE: &str = "home";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Details,
}

/// Where the app currently is
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    Home,
    Details(Box<Movie>),
}

/// Emitted when a movie is selected anywhere on the catalog screen
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationEvent {
    pub screen: Screen,
    pub payload: String,
}

impl NavigationEvent {
    /// Back to the catalog
    pub fn home() -> Self {
        Self {
            screen: Screen::Home,
            payload: String::new(),
        }
    }

    pub fn details(movie: &Movie) -> Result<Self, RouteError> {
        let json = movie.to_json()?;
        Ok(Self {
            screen: Screen::Details,
            payload: urlencoding::encode(&json).into_owned(),
        })
    }

    pub fn route(&self) -> String {
        match self.screen {
            Screen::Home => HOME_ROUTE.to_string(),
            Screen::Details => format!("{}/{}", DETAILS_PREFIX, self.payload),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),

    #[error("Route payload is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("Route payload is not a movie: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for RouteError {
    fn from(err: serde_json::Error) -> Self {
        RouteError::Payload(err.to_string())
    }
}

impl Destination {
    /// Resolve a route string produced by [`NavigationEvent::route`]
    pub fn parse(route: &str) -> Result<Self, RouteError> {
        if route.is_empty() || route == HOME_ROUTE {
            return Ok(Destination::Home);
        }

        let Some(payload) = route
            .strip_prefix(DETAILS_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return Err(RouteError::Unknown(route.to_string()));
        };

        let json = urlencoding::decode(payload).map_err(|e| RouteError::Encoding(e.to_string()))?;
        let movie = Movie::from_json(&json)?;
        Ok(Destination::Details(Box::new(movie)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::sample_movie;

    #[test]
    fn test_details_round_trip() {
        let mut movie = sample_movie(1011985, Some("/1XDDXPXGiI8id7MrUxK36ke7gkX.jpg"));
        movie.overview = "Po is gearing up & ready / set? 100% \"yes\"".to_string();
        movie.original_title = Some("功夫熊猫4".to_string());

        let event = NavigationEvent::details(&movie).unwrap();
        let route = event.route();

        assert!(route.starts_with("details/"));
        assert!(!route["details/".len()..].contains('/'));

        assert_eq!(Destination::parse(&route).unwrap(), Destination::Details(Box::new(movie)));
    }

    #[test]
    fn test_home_routes() {
        let event = NavigationEvent::home();
        assert_eq!(event.screen, Screen::Home);
        assert_eq!(Destination::parse(&event.route()).unwrap(), Destination::Home);

        assert_eq!(Destination::parse("").unwrap(), Destination::Home);
        assert_eq!(Destination::parse("home").unwrap(), Destination::Home);
    }

    #[test]
    fn test_bad_routes() {
        assert!(matches!(Destination::parse("settings"), Err(RouteError::Unknown(_))));
        assert!(matches!(
            Destination::parse("details/%7Bnot-json"),
            Err(RouteError::Payload(_))
        ));
    }
}
