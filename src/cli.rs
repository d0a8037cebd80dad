use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pda-inbound")]
#[command(about = "ハンディ端末（PDA）入庫作業シミュレータ", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 端末セッションを対話的に実行
    Run {
        /// 工号（省略時はログイン画面で入力）
        #[arg(short, long)]
        operator: Option<String>,

        /// 乱数シード（電子秤・スキャンの模擬値を再現）
        #[arg(short, long)]
        seed: Option<u64>,

        /// 終了時に入庫履歴をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// MIDを許可リストと照合
    Check {
        /// 照合するMID
        #[arg(required = true)]
        mids: Vec<String>,
    },

    /// 許可MIDの一覧を表示
    Mids,

    /// 庫位コードを生成
    Code {
        /// 生成数
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// 乱数シード
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// 設定を表示/編集
    Config {
        /// 工号の初期値を設定（空文字で解除）
        #[arg(long)]
        set_operator: Option<String>,

        /// 既定値に戻す
        #[arg(long)]
        reset: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
