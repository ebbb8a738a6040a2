//! Wisp - 命令行调用入口
//!
//! 用法：`wisp [--trigger] [--blocking] [--verbose] <qualified-name> [json-params]`
//!
//! 凭证与后端地址来自 config/default.toml 与 WISP__* 环境变量；
//! 每次运行恰好执行一次调用，回执以 JSON 打印到标准输出。

use anyhow::{bail, Context};
use serde_json::Value;

use wisp::client::Client;
use wisp::config::load_config;

const USAGE: &str = "Usage: wisp [--trigger] [--blocking] [--verbose] <qualified-name> [json-params]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wisp::observability::init();

    let mut trigger = false;
    let mut blocking = false;
    let mut verbose = false;
    let mut positional = Vec::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--trigger" => trigger = true,
            "--blocking" => blocking = true,
            "--verbose" => verbose = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }

    let Some(qualified_name) = positional.first() else {
        bail!("{}", USAGE);
    };

    let parameters = positional
        .get(1)
        .map(|raw| serde_json::from_str::<Value>(raw).context("Invalid JSON parameters"))
        .transpose()?;

    let config = load_config(None).unwrap_or_default();
    let mut client = Client::from_config(&config);
    if verbose {
        client.set_verbose_replies(true);
    }

    let reply = if trigger {
        client
            .fire_trigger(qualified_name, parameters.as_ref())
            .await
            .context("Trigger fire failed")?
    } else {
        client
            .invoke_action(qualified_name, parameters.as_ref(), blocking)
            .await
            .context("Action invocation failed")?
    };

    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}
