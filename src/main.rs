use movie_browser::app::MoviesApp;
use movie_browser::config::AppConfig;
use movie_browser::logging;
use movie_browser::network::client::TmdbClient;

fn main() -> iced::Result {
    logging::init();

    let config = AppConfig::load();

    // The app cannot do anything without its HTTP client
    let client = TmdbClient::new(&config).expect("Failed to initialize HTTP client");

    iced::application("Movies", MoviesApp::update, MoviesApp::view)
        .subscription(MoviesApp::subscription)
        .theme(MoviesApp::theme)
        .window_size((1280.0, 800.0))
        .centered()
        .run_with(move || MoviesApp::new(config, client))
}
