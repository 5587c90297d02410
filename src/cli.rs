use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xray_common::api::REPORT_FILE_NAME;

#[derive(Parser)]
#[command(name = "xray-detect")]
#[command(about = "Chest X-ray Disease Detection client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// X線画像を送信して判定結果を表示
    Predict {
        /// 画像ファイル（JPG/PNG/WEBP/HEIC）
        #[arg(required = true)]
        image: PathBuf,

        /// 患者名
        #[arg(short, long)]
        name: Option<String>,

        /// 年齢（数字のみ、3桁まで）
        #[arg(short, long)]
        age: Option<String>,

        /// 性別 (Male/Female/Other)
        #[arg(short, long)]
        gender: Option<String>,

        /// 国名または国番号（例: India, +44）
        #[arg(short, long)]
        country: Option<String>,

        /// 電話番号（国番号なし）
        #[arg(short, long)]
        phone: Option<String>,

        /// PDFレポートも取得する（保存先省略時は ChestXray_Report.pdf）
        #[arg(long, num_args = 0..=1, default_missing_value = REPORT_FILE_NAME)]
        report: Option<PathBuf>,

        /// 入力画像とGrad-CAM画像をPNGで保存するフォルダ
        #[arg(long)]
        save_images: Option<PathBuf>,
    },

    /// 予測履歴を表示
    History {
        /// 履歴を削除
        #[arg(long)]
        clear: bool,
    },

    /// 対応国と電話番号桁数を表示
    Countries,

    /// 設定
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_backend_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
