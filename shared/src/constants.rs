pub const API_BASE_URL: &str = "http://localhost:3000/api";
pub const CATALOG_ENDPOINT: &str = "/catalog";
pub const WHEEL_STATE_ENDPOINT: &str = "/wheel/state";
pub const WHEEL_SPIN_ENDPOINT: &str = "/wheel/spin";
pub const WHEEL_SETTLE_ENDPOINT: &str = "/wheel/settle";
pub const WHEEL_RESET_ENDPOINT: &str = "/wheel/reset";
pub const CONTENT_ENDPOINT: &str = "/content";
pub const CONTENT_DISMISS_ENDPOINT: &str = "/content/dismiss";
pub const LEADERBOARD_ENDPOINT: &str = "/leaderboard";

pub const ALREADY_SPINNING_MESSAGE: &str = "轮盘还在转，请稍等片刻";
pub const NO_PENDING_SPIN_ERROR: &str = "当前没有等待结束的抽奖";
pub const NETWORK_ERROR: &str = "网络异常，请稍后重试。";
pub const CONTENT_RETRY_MESSAGE: &str = "暂时无法获取推荐内容，请再转一次试试。";
pub const RELOAD_MESSAGE: &str = "与服务器的连接中断，请刷新页面后再试。";

pub const CONTENT_POLL_INTERVAL_MS: u32 = 250;
pub const MAX_CONTENT_POLLS: u32 = 80; // 20 s of polling

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_localized() {
        for message in [
            ALREADY_SPINNING_MESSAGE,
            NO_PENDING_SPIN_ERROR,
            NETWORK_ERROR,
            CONTENT_RETRY_MESSAGE,
            RELOAD_MESSAGE,
        ] {
            assert!(!message.chars().any(|c| c.is_ascii_alphabetic()), "untranslated: {}", message);
        }
    }
}
