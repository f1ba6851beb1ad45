use log::debug;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    debug!("picosh starting, pid {}", std::process::id());

    picosh::repl::start();

    debug!("picosh exiting on end of input");
}
