//! Mock posts server binary for running the suite without network access
//!
//! Serves the JSONPlaceholder posts contract on localhost until Ctrl-C.

use std::net::SocketAddr;

use clap::Parser;
use hyper::StatusCode;
use posts_api::common::logging;
use posts_api::mock::{MockBehavior, MockPostsServer};

#[derive(Parser)]
#[command(name = "mock-posts", about = "Local mock of the JSONPlaceholder posts resource")]
#[command(version, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, short, default_value_t = 3000)]
    port: u16,

    /// Answer DELETE with 204 No Content instead of 200
    #[arg(long)]
    no_content_delete: bool,
}

#[tokio::main]
async fn main() {
    logging::init_cli();
    let args = Args::parse();

    let behavior = MockBehavior {
        delete_status: if args.no_content_delete {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::OK
        },
        ..Default::default()
    };

    let server = match MockPostsServer::start(SocketAddr::from(([127, 0, 0, 1], args.port)), behavior).await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("Serving posts at {}/posts (Ctrl-C to stop)", server.base_url());

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for ctrl-c: {e}");
        }
        let _ = shutdown.send(());
    });

    server.wait().await;
}
