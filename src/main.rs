use anyhow::Context;

fn main() -> anyhow::Result<()> {
    popwin::run(std::env::args().skip(1)).context("popwin failed")
}
