pub mod check_urls;
pub mod enrich;
pub mod export;
pub mod import;
pub mod lint;
pub mod run;
pub mod schema;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Import(args) => import::handle(&args, ctx, flags),
        Commands::Lint => lint::handle(ctx, flags),
        Commands::Enrich(args) => enrich::handle(&args, ctx, flags).await,
        Commands::CheckUrls => check_urls::handle(ctx, flags).await,
        Commands::Export(args) => export::handle(&args, ctx, flags),
        Commands::Run => run::handle(ctx, flags).await,
        Commands::Schema(args) => schema::handle(&args),
    }
}
