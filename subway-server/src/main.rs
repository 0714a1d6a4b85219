use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use subway_server::service::SubwayService;
use subway_server::store::MemoryStore;
use subway_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("subway_server=debug,tower_http=info")),
        )
        .init();

    let service = SubwayService::new(MemoryStore::new());
    let state = AppState::new(service);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Subway admin server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET    /health                                - Health check");
    println!("  POST   /stations                              - Create a station");
    println!("  GET    /stations                              - List stations");
    println!("  DELETE /stations/{{id}}                         - Delete a station");
    println!("  POST   /lines                                 - Create a line");
    println!("  GET    /lines                                 - List lines");
    println!("  GET    /lines/detail                          - All lines with stations");
    println!("  GET    /lines/{{id}}                            - Line with stations in order");
    println!("  PUT    /lines/{{id}}                            - Update line metadata");
    println!("  DELETE /lines/{{id}}                            - Delete a line");
    println!("  POST   /lines/{{id}}/stations                   - Insert a station into a line");
    println!("  DELETE /lines/{{id}}/stations/{{station_id}}      - Remove a station from a line");
    println!("  GET    /paths?source=&target=&type=           - Shortest path query");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
