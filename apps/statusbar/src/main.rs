use clap::Parser;
use wsb_statusbar::Args;

#[wsb_runtime::main(lightweight)]
async fn main() -> anyhow::Result<()> {
    wsb_statusbar::run(Args::parse()).await
}
