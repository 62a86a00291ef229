use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// 构建 Tokio 运行时，线程数优先取 config.toml，其次环境变量
fn build_runtime(worker_threads: Option<usize>) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    builder.build()
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG is visible to the subscriber
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let instance_id = Uuid::new_v4();
    let pid = std::process::id();

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "transcript-api",
            event = "panic",
            %instance_id,
            pid,
            message = %info,
            "unhandled panic"
        );
    }));

    let worker_threads = configs::AppConfig::load_and_validate()
        .map(|cfg| cfg.server.worker_threads)
        .unwrap_or_else(|_| {
            std::env::var("TOKIO_WORKER_THREADS")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
        });

    let rt = match build_runtime(worker_threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "transcript-api",
        event = "start",
        %instance_id,
        pid,
        version = env!("CARGO_PKG_VERSION"),
        "transcript server starting"
    );

    rt.block_on(async move {
        let server_task = tokio::spawn(server::run());

        // 监听 Ctrl+C 优雅停机
        tokio::select! {
            res = server_task => match res {
                Ok(Ok(())) => {
                    info!(event = "stop", %instance_id, "server stopped normally");
                    std::process::ExitCode::SUCCESS
                }
                Ok(Err(e)) => {
                    error!(event = "run_failed", error = %e, "server::run returned error");
                    std::process::ExitCode::FAILURE
                }
                Err(e) => {
                    error!(event = "task_join_error", error = %e, "server task join error");
                    std::process::ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(event = "shutdown_signal", %instance_id, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
