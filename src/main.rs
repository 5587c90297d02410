use anyhow::Context;
use clap::Parser;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use xray_common::country::{self, CountryPhoneRule, COUNTRIES};
use xray_common::session::MSG_HISTORY_CLEARED;
use xray_common::{Gender, HistoryCache, Session};
use xray_detect::cli::{Cli, Commands};
use xray_detect::client::BackendClient;
use xray_detect::config::Config;
use xray_detect::error::{Result, XrayError};
use xray_detect::history::FileStore;
use xray_detect::preprocess::{self, PreparedImage};
use xray_detect::{export, render};

type CliSession = Session<FileStore, PreparedImage>;

struct PredictArgs {
    image: PathBuf,
    name: Option<String>,
    age: Option<String>,
    gender: Option<String>,
    country: Option<String>,
    phone: Option<String>,
    report: Option<PathBuf>,
    save_images: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load().context("設定ファイルを読み込めません")?;

    match cli.command {
        Commands::Predict { image, name, age, gender, country, phone, report, save_images } => {
            println!("🩻 xray-detect - 胸部X線判定\n");
            let args = PredictArgs { image, name, age, gender, country, phone, report, save_images };
            run_predict(&config, args).await?;
        }

        Commands::History { clear } => {
            let mut history = HistoryCache::load(FileStore::open_default()?);
            if clear {
                history.clear().context("履歴を削除できません")?;
                println!("✔ {}", MSG_HISTORY_CLEARED);
            } else {
                print!("{}", render::format_history(history.records()));
            }
        }

        Commands::Countries => {
            print!("{}", render::format_countries());
        }

        Commands::Config { set_backend_url, show } => {
            if let Some(url) = set_backend_url {
                config.set_backend_url(&url);
                config.save()?;
                println!("✔ バックエンドURLを設定しました");
            }

            if show {
                let backend = config.backend();
                println!("設定:");
                println!("  バックエンドURL: {}", backend.base_url());
                println!("  タイムアウト: {}秒", backend.timeout_secs());
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "xray_detect=debug,info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run_predict(config: &Config, args: PredictArgs) -> Result<()> {
    let client = BackendClient::new(config.backend())?;
    let mut session: CliSession = Session::new(FileStore::open_default()?);
    tracing::debug!(backend = %client.config().base_url(), "predict");

    fill_form(&mut session, &args)?;

    // 1. 画像の準備
    let file_name = args
        .image
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let needs_conversion = preprocess::needs_conversion(&args.image);
    session.begin_file_selection(&file_name, needs_conversion)?;

    let convert_spinner = needs_conversion.then(|| spinner("Converting HEIC image..."));
    let prepared = preprocess::prepare_image(&args.image).await;
    if let Some(convert_spinner) = convert_spinner {
        convert_spinner.finish_and_clear();
    }
    match prepared {
        Ok(image) => {
            let name = image.file_name.clone();
            session.finish_file_selection(image, name);
        }
        Err(e) => {
            if needs_conversion {
                session.fail_file_selection();
                print_toast(&session);
            }
            return Err(e);
        }
    }
    print_toast(&session);

    // 2. 予測
    let submission = session.begin_submission()?;
    print_toast(&session);

    let predict_spinner = spinner("Analyzing X-ray...");
    let outcome = client.predict(&submission).await;
    predict_spinner.finish_and_clear();
    let failure = XrayError::from_outcome(&outcome);
    session.finish_submission(outcome, &local_timestamp());
    if let Some(err) = failure {
        return Err(err);
    }

    let result = session.result().cloned().ok_or(XrayError::BackendUnavailable)?;
    print_toast(&session);
    println!("\n{}", render::format_result(&result));

    // 3. 画像保存
    if let Some(dir) = &args.save_images {
        for path in export::save_result_images(&result, dir)? {
            println!("✔ 画像を保存: {}", path.display());
        }
    }

    // 4. レポート
    if let Some(dest) = &args.report {
        let request = session.begin_report()?;
        print_toast(&session);

        let spinner = spinner("Generating PDF...");
        let outcome = client.download_report(&request, dest).await;
        spinner.finish_and_clear();

        session.finish_report(outcome.as_ref().map(|_| ()));
        print_toast(&session);
        outcome?;
        println!("✔ レポートを保存: {}", dest.display());
    }

    Ok(())
}

/// 引数で足りない性別・国は端末なら選択させる
fn fill_form(session: &mut CliSession, args: &PredictArgs) -> Result<()> {
    let interactive = std::io::stdin().is_terminal();

    let gender = match &args.gender {
        Some(value) => Gender::parse(value),
        None if interactive => prompt_gender()?,
        None => Gender::Unspecified,
    };

    let rule = match &args.country {
        Some(query) => country::lookup(query)
            .ok_or_else(|| XrayError::Config(format!("未対応の国です: {}", query)))?,
        None if interactive => prompt_country()?,
        None => CountryPhoneRule::default_rule(),
    };

    let form = session.form_mut();
    if let Some(name) = &args.name {
        form.set_name(name);
    }
    if let Some(age) = &args.age {
        form.set_age(age);
    }
    form.set_gender(gender);
    form.select_country(rule);
    if let Some(phone) = &args.phone {
        form.set_phone(phone);
    }
    Ok(())
}

fn prompt_gender() -> Result<Gender> {
    let labels: Vec<&str> = Gender::CHOICES.iter().map(|g| g.as_str()).collect();
    let index = Select::new()
        .with_prompt("Gender")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| XrayError::Prompt(e.to_string()))?;
    Ok(Gender::CHOICES[index])
}

fn prompt_country() -> Result<&'static CountryPhoneRule> {
    let labels: Vec<String> = COUNTRIES.iter().map(|c| c.label()).collect();
    let index = Select::new()
        .with_prompt("Country")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| XrayError::Prompt(e.to_string()))?;
    Ok(country::by_index(index).unwrap_or_else(CountryPhoneRule::default_rule))
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_toast(session: &CliSession) {
    if let Some(toast) = session.toast() {
        println!("▸ {}", toast.message);
    }
}

/// 履歴用のローカル日時（"<日付>, <時刻>"）
fn local_timestamp() -> String {
    chrono::Local::now().format("%-d/%-m/%Y, %-I:%M:%S %p").to_string()
}
