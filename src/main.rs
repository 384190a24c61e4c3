use anyhow::{Context, Result};
use question_browser::app::QuestionBrowser;
use question_browser::config::Config;
use question_browser::infrastructure::{FileStore, ResourceClient, SystemEnvironment};
use question_browser::utils::logging;
use tokio::io::BufReader;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config);

    let store = FileStore::open(&config.storage_file)
        .with_context(|| format!("无法打开存储文件: {}", config.storage_file))?;
    let environment = SystemEnvironment::new(config.prefers_color_scheme.clone());

    let mut app = QuestionBrowser::new(ResourceClient::new(), store, environment, &config);

    // 加载失败时界面上已经换成错误提示，仍然进入命令循环以便 reload
    if let Err(e) = app.initialize().await {
        error!("初始化失败: {}", e);
        if config.exit_on_load_error {
            println!("{}", app.screen(std::time::Instant::now()));
            return Err(e.into());
        }
    }

    app.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
