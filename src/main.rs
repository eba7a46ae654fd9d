use std::process;

use red_flag::Config;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = red_flag::run(&Config::default()) {
        log::error!("{}", err);
        process::exit(1);
    }
}
