use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};

use super::error::CatalogError;
use crate::config::AppConfig;
use crate::state::data::{Category, MovieList};

/// Longest error body kept in a `CatalogError`
const MAX_ERROR_BODY: usize = 200;

/// TMDB v3 client for the movie list endpoints
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: Client,
    base_url: String,
    access_token: Option<String>,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        tracing::info!("🌐 TMDB client using {}", config.api_base_url);

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            language: config.language.clone(),
        })
    }

    /// Shared HTTP client, also used for image downloads
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn list_url(&self, category: Category) -> String {
        format!("{}/3/movie/{}", self.base_url, category.endpoint())
    }

    /// Fetch the first page of a category
    pub async fn fetch(&self, category: Category) -> Result<MovieList, CatalogError> {
        let mut request = self
            .http
            .get(self.list_url(category))
            .header(ACCEPT, "application/json")
            .query(&[("language", self.language.as_str()), ("page", "1")]);

        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        parse_movie_list(&body)
    }
}

/// Decode a list endpoint body
pub fn parse_movie_list(body: &str) -> Result<MovieList, CatalogError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const POPULAR_PAGE: &str = r#"{
        "page": 1,
        "results": [
            {
                "adult": false,
                "backdrop_path": "/1XDDXPXGiI8id7MrUxK36ke7gkX.jpg",
                "genre_ids": [28, 12, 16, 35, 10751],
                "id": 1011985,
                "original_language": "en",
                "original_title": "Kung Fu Panda 4",
                "overview": "Po is gearing up to become the spiritual leader of his Valley of Peace...",
                "popularity": 5263.595,
                "poster_path": "/wkfG7DaExmcVsGLR4kLouMwxeT5.jpg",
                "release_date": "2024-03-02",
                "title": "Kung Fu Panda 4",
                "video": false,
                "vote_average": 6.916,
                "vote_count": 286
            }
        ],
        "total_pages": 43188,
        "total_results": 863758
    }"#;

    /// Answer exactly one HTTP request with a canned response, returning the
    /// raw request text once it has been served.
    async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn client(base_url: String) -> TmdbClient {
        TmdbClient::new(&AppConfig {
            api_base_url: base_url,
            access_token: Some("test-token".to_string()),
            ..AppConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_popular() {
        let (base_url, server) = serve_once("200 OK", POPULAR_PAGE.to_string()).await;

        let list = client(base_url).fetch(Category::Popular).await.unwrap();

        assert_eq!(list.page, 1);
        assert_eq!(list.total_pages, 43188);
        assert_eq!(list.results[0].id, 1011985);
        assert_eq!(list.results[0].title, "Kung Fu Panda 4");

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /3/movie/popular?"));
        assert!(request.contains("language=en-us"));
        assert!(request.contains("authorization: bearer test-token"));
        assert!(request.contains("accept: application/json"));
    }

    #[tokio::test]
    async fn test_non_200_is_a_failure() {
        let body = r#"{"status_code":7,"status_message":"Invalid API key"}"#.to_string();
        let (base_url, server) = serve_once("401 Unauthorized", body).await;

        let err = client(base_url).fetch(Category::Upcoming).await.unwrap_err();
        server.await.unwrap();

        match err {
            CatalogError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_failure() {
        let (base_url, server) = serve_once("200 OK", "{\"page\": 1, \"results\": [".to_string()).await;

        let err = client(base_url).fetch(Category::TopRated).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_failure() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{}", addr))
            .fetch(Category::NowPlaying)
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[test]
    fn test_list_urls() {
        let client = client("https://api.themoviedb.org/".to_string());

        assert_eq!(
            client.list_url(Category::NowPlaying),
            "https://api.themoviedb.org/3/movie/now_playing"
        );
    }

    #[test]
    fn test_parse_empty_page() {
        let list = parse_movie_list(
            r#"{"page": 1, "results": [], "total_pages": 0, "total_results": 0}"#,
        )
        .unwrap();

        assert!(list.is_empty());
    }
}
