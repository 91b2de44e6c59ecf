//! k-means++ Clustering Binary
//!
//! Joins two keyed tables, clusters the joined rows, and prints the seeded
//! row indices followed by the final centers.
//!
//! Usage: kmeanspp K [ITER] EPSILON FILE1 FILE2 [--seed S] [--verbose] [--json]

use clap::Parser;
use kmeanspp::cli::*;

fn main() {
    let args = Args::parse();
    kmeanspp::log(match args.verbose {
        true => log::LevelFilter::Debug,
        false => log::LevelFilter::Warn,
    });
    let result = Config::try_from(args).and_then(|config| {
        let outcome = config.run()?;
        config.render(&outcome)
    });
    match result {
        Ok(text) => println!("{}", text),
        Err(e) => {
            log::error!("{:#}", e);
            println!("{}", headline(&e));
            std::process::exit(1);
        }
    }
}
