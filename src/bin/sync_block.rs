use lockbench::{cli, CounterKind};

fn main() -> anyhow::Result<()> {
    cli::run_variant(CounterKind::SyncBlock)
}
