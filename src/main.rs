mod run;

use anyhow::Result;

fn main() -> Result<()> {
    mies::init();
    let args: Vec<String> = std::env::args().collect();

    match args.len() {
        0 | 1 => {
            run::print_usage();
            Ok(())
        }
        _ => run::as_cli(&args),
    }
}
