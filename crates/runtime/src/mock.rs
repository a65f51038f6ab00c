use once_cell::sync::Lazy;
use regex::Regex;

static ECHO_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"echo\s+"(.+)""#).expect("echo pattern"));
static ECHO_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"echo\s+(.+);").expect("echo pattern"));

/// Deterministic heuristic interpreter used when the real runtime path is
/// unavailable. The entry file's content is inspected for recognizable
/// constructs in a fixed priority order and a canned log sequence is
/// emitted for the first match; with no match, a line-oriented scan prints
/// the argument of every `echo` statement, and an exit line is appended
/// when nothing at all was produced.
/// 真實執行路徑不可用時使用的決定性啟發式直譯器。依固定優先序檢查進入點
/// 內容中可辨識的語法結構，對第一個符合者輸出預錄的紀錄序列；皆不符合時改
/// 以逐行掃描印出每個 `echo` 的字串引數，完全沒有輸出時補上結束訊息。
pub fn mock_execute(code: &str, logs: &mut Vec<String>) {
    let base = logs.len();

    if code.contains("http.Server") || code.contains("http::listen") {
        push_all(
            logs,
            &[
                "[INFO] Starting server on port 8080...",
                "[INFO] Request received: /api/v1/status",
                "[INFO] Request received: /favicon.ico",
                "Server running. Press Ctrl+C to stop.",
            ],
        );
    } else if code.contains("webview::create") {
        push_all(
            logs,
            &[
                "[GUI] Initializing WebView window...",
                "[GUI] Window 'Zephyr App' created (800x600)",
                "[GUI] Navigate: data:text/html,...",
                "[GUI] Bound function: greet",
                "[GUI] Waiting for frontend events...",
            ],
        );
    } else if code.contains("websocket::listen") {
        push_all(
            logs,
            &[
                "[WS] Listening on :8080",
                "[WS] New connection from 127.0.0.1:54321",
                "[WS] Spawning handler fiber...",
                "[WS] Connection active.",
            ],
        );
    } else if code.contains("Utils::deploy") || (code.contains("std/os") && code.contains("deploy"))
    {
        push_all(
            logs,
            &[
                "=== Zephyr CLI v1.0 ===",
                "",
                "Executing command: deploy",
                "[*] Starting deployment to: production",
                "    > Step 1/3: Processing assets...",
                "    > Step 2/3: Processing assets...",
                "    > Step 3/3: Processing assets...",
                "[+] Deployment successful!",
                "",
                "Program exited with code 0.",
            ],
        );
    } else {
        for line in code.lines() {
            if let Some(text) = match_echo(line) {
                logs.push(text);
            }
        }
        if logs.len() == base {
            logs.push("Program exited with code 0.".to_string());
        }
    }
}

fn push_all(logs: &mut Vec<String>, lines: &[&str]) {
    logs.extend(lines.iter().map(|line| line.to_string()));
}

fn match_echo(line: &str) -> Option<String> {
    let captured = ECHO_QUOTED
        .captures(line)
        .or_else(|| ECHO_BARE.captures(line))?;
    let raw = captured.get(1)?.as_str();

    let cleaned = raw.replacen(';', "", 1);
    let trimmed = cleaned.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);
    Some(unquoted.to_string())
}
