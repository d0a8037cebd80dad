use clap::Parser;
use pda_inbound::{cli, config, console, error, logging};
use pda_inbound_common::{storage_code, DeviceSimulator, RandomDevice};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(logging::Verbosity::from_flag(cli.verbose));

    match cli.command {
        Commands::Run { operator, seed, json } => {
            let config = Config::load()?;
            println!("📟 pda-inbound - 入庫作業\n");
            println!("操作: スキャン欄で空Enter = 側面トリガー");
            console::run_session(&config, operator, seed, json).await?;
        }

        Commands::Check { mids } => {
            let table = Config::load()?.mid_table();
            let mut misses = 0;
            for mid in &mids {
                match table.check(mid) {
                    Ok(()) => println!("✔ {} 一致", mid),
                    Err(e) => {
                        misses += 1;
                        println!("✖ {}", e);
                    }
                }
            }
            println!("\n{}件中 {}件一致", mids.len(), mids.len() - misses);
        }

        Commands::Mids => {
            let table = Config::load()?.mid_table();
            println!("許可MID ({}件):", table.len());
            for mid in table.iter() {
                println!("  {}", mid);
            }
        }

        Commands::Code { count, seed } => {
            let mut device = match seed {
                Some(seed) => RandomDevice::with_seed(seed),
                None => RandomDevice::new(),
            };
            for _ in 0..count {
                let code = device.scan_storage_code();
                debug_assert!(storage_code::is_well_formed(&code));
                println!("{}", code);
            }
        }

        Commands::Config { set_operator, reset, show } => {
            // 壊れた設定ファイルでも --reset は読み込まずに上書きする
            let mut config = if reset {
                let config = Config::reset()?;
                println!("✔ 設定を既定値に戻しました");
                config
            } else {
                Config::load()?
            };

            if let Some(operator) = set_operator {
                config.set_operator(Some(operator))?;
                println!("✔ 工号の初期値を設定しました");
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  工号初期値: {}", config.default_operator.as_deref().unwrap_or("未設定"));
                println!(
                    "  許可MID: {}",
                    if config.valid_mids.is_empty() {
                        "組み込みリスト".to_string()
                    } else {
                        format!("{}件", config.valid_mids.len())
                    }
                );
                println!("  ログイン待ち: {}ms", config.login_delay_ms);
                println!("  通知表示: {}ms", config.notice_ms);
                println!("  スキャン一致率: {:.0}%", config.scan_hit_rate * 100.0);
            }
        }
    }

    Ok(())
}
