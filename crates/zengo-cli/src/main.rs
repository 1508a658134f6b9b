mod command;
mod library;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
