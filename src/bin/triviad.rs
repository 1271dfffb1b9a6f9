use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use diesel::r2d2::ConnectionManager;
use failure::ResultExt;
use std::net::SocketAddr;
use std::path::PathBuf;
use structopt::StructOpt;
use trivia::api;
use trivia::catalog::{Catalog, DbPool, PgCatalog};
use trivia::memory::MemoryCatalog;

fn cors() -> actix_cors::CorsFactory {
    Cors::new()
        .allowed_methods(vec!["GET", "PATCH", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .finish()
}

#[derive(StructOpt)]
struct Args {
    #[structopt(short, long, default_value = "0.0.0.0:5000")]
    bind: SocketAddr,
    #[structopt(short, long, env = "DATABASE_URL")]
    database_url: Option<String>,
    #[structopt(long, default_value = "10")]
    pool_size: u32,
    /// Serve an in-memory catalog loaded from this JSON fixture instead of PostgreSQL
    #[structopt(long, parse(from_os_str))]
    seed: Option<PathBuf>,
}

async fn serve<C>(catalog: C, bind: SocketAddr) -> std::io::Result<()>
where
    C: Catalog + Clone + Send + Sync + 'static,
{
    log::info!("listening on {}", bind);
    HttpServer::new(move || {
        App::new()
            .data(catalog.clone())
            .app_data(api::json_config())
            .app_data(api::query_config())
            .configure(api::config::<C>)
            .default_service(web::route().to(api::not_found))
            .wrap(cors())
            .wrap(middleware::Logger::default())
    })
    .bind(&bind)?
    .run()
    .await
}

#[actix_rt::main]
async fn main() -> Result<(), exitfailure::ExitFailure> {
    env_logger::init();
    let _ = dotenv::dotenv();
    let args = Args::from_args();

    if let Some(seed) = args.seed {
        let catalog = MemoryCatalog::open(&seed)
            .with_context(|_| format!("unable to load {}", seed.display()))?;
        serve(catalog, args.bind).await?;
        return Ok(());
    }

    let db = args
        .database_url
        .ok_or_else(|| failure::err_msg("DATABASE_URL or --seed is required"))?;
    let cm = ConnectionManager::new(&db);
    let pool = DbPool::builder()
        .max_size(args.pool_size)
        .build(cm)
        .context("unable to connect database")?;
    serve(PgCatalog::new(pool), args.bind).await?;
    Ok(())
}
