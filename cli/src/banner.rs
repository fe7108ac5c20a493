extern crate colored;
use colored::*;

// hand-stacked letters, one color per word
#[rustfmt::skip]
pub fn print_banner() {
    println!("{}{}",  "  ____                           _   ".magenta().bold(), "       _   _ ".cyan().bold());
    println!("{}{}",  " |  _ \\ ___  __ _ _   _  ___  ___| |_ ".magenta().bold(), "  ___| |_| |".cyan().bold());
    println!("{}{}",  " | |_) / _ \\/ _` | | | |/ _ \\/ __| __|".magenta().bold(), " / __| __| |".cyan().bold());
    println!("{}{}",  " |  _ <  __/ (_| | |_| |  __/\\__ \\ |_ ".magenta().bold(), "| (__| |_| |".cyan().bold());
    println!("{}{}",  " |_| \\_\\___|\\__, |\\__,_|\\___||___/\\__|".magenta().bold(), " \\___|\\__|_|".cyan().bold());
    println!("{}",    "               |_|                    ".magenta().bold());
}
