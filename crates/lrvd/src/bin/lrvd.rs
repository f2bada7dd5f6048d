//! LeRobo-Vous daemon launcher
//!
//! Usage:
//!   lrvd --poste teleop --teleop.port /dev/ttyACM0
//!   lrvd --poste robot --robot.port /dev/ttyACM1 --robot.cameras '{"front": {...}}'
//!   lrvd --poste robot --reset-secret

use lrvd::{
    check_compatibility, resolve, run_daemon, LauncherSettings, PythonProbe, VersionRequirement,
};

const BANNER: &str = "

    LeRobo-Vous
    a Brain Wave Collective project
";

fn main() {
    println!("{}", BANNER);

    // Initialize logging. Without RUST_LOG the level follows --log-level once parsed.
    let env = env_logger::Env::default().default_filter_or("trace");
    env_logger::Builder::from_env(env).init();
    set_log_level(log::LevelFilter::Info);

    let settings = match LauncherSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Version gate
    let requirement = match settings.manifest_path() {
        Some(path) => VersionRequirement::from_manifest(path),
        None => VersionRequirement::default(),
    };
    let probe = PythonProbe::new(settings.python());
    if let Err(e) = check_compatibility(&requirement, &probe) {
        println!("{}", e);
        std::process::exit(e.exit_code());
    }

    // Session configuration
    let config = match resolve(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            if e.exit_code() == 0 {
                println!("{}", e);
            } else {
                eprintln!("{}", e);
            }
            std::process::exit(e.exit_code());
        }
    };
    set_log_level(config.log_level.to_level_filter());

    let command = settings.daemon.clone().with_default_program(settings.python());
    let err = run_daemon(config, &command);
    log::error!("{}", err);
    std::process::exit(1);
}

fn set_log_level(level: log::LevelFilter) {
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(level);
    }
}
