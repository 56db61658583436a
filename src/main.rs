use std::process;

use caex::Explorer;

fn main() {
    if let Err(err) = Explorer::new().run() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
