//! MongoDB 集合读取工具
//!
//! 连接 MongoDB，读取单个集合中的全部文档并逐行输出：
//! - 从环境变量或 `.env` 加载连接串
//! - 建立连接并 ping 校验
//! - 无过滤条件查询并打印结果

mod connector;
mod fetcher;

use std::process::ExitCode;

use anyhow::Context;
use common::config::AppConfig;
use common::errors::AppError;
use connector::Connector;
use fetcher::Fetcher;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DATABASE_NAME: &str = "new_database";
const COLLECTION_NAME: &str = "posts";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 初始化日志追踪（输出到 stderr，stdout 只保留结果）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.downcast_ref::<AppError>().map(AppError::code).unwrap_or("UNKNOWN");
            error!(code, error = %format!("{:#}", e), "mongo-reader failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    // 加载配置
    let config = AppConfig::load().context("loading configuration")?;

    // 建立连接
    let session = Connector::new(config)
        .connect()
        .await
        .context("opening MongoDB session")?;
    println!("Connected to MongoDB successfully!");

    // 读取集合
    let records = Fetcher::new(&session)
        .fetch_all(DATABASE_NAME, COLLECTION_NAME)
        .await
        .with_context(|| format!("retrieving {}.{}", DATABASE_NAME, COLLECTION_NAME))?;

    println!("Retrieved data from MongoDB collection:");
    for record in &records {
        println!("{}", record);
    }
    Ok(())
}
