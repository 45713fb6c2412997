use serde_json::{json, Value};
use shared::catalog::is_stay_home;

const STAY_HOME_TEXT_PROMPT: &str =
    "生成一份关于'周末宅家休息'的幽默且放松的指南。把它当作一个'旅游目的地'来介绍。";

const STAY_HOME_IMAGE_PROMPT: &str = "A cozy, warm, lo-fi style illustration of a person relaxing at home on a weekend, playing video games or reading, snacks nearby, comfortable atmosphere, soft lighting.";

pub const IMAGE_ASPECT_RATIO: &str = "16:9";

pub fn text_prompt(name: &str) -> String {
    if is_stay_home(name) {
        STAY_HOME_TEXT_PROMPT.to_string()
    } else {
        format!("请为上海的\"{}\"生成一份有趣且简短的旅行指南。", name)
    }
}

pub fn image_prompt(name: &str) -> String {
    if is_stay_home(name) {
        STAY_HOME_IMAGE_PROMPT.to_string()
    } else {
        format!(
            "A breathtaking, photorealistic travel photography shot of {} in Shanghai, China. Sunny weather, vibrant colors, wide angle, high resolution, cinematic lighting, 4k.",
            name
        )
    }
}

/// Structured-output schema for the travel tip.
pub fn travel_tip_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": {
                "type": "STRING",
                "description": "两句关于这个'景点'的精彩描述。"
            },
            "proTip": {
                "type": "STRING",
                "description": "一条具体的建议（例如：最佳时间、隐藏景点或宅家零食）。"
            },
            "attractions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "该地点的3个必做事项或景点列表。"
            }
        },
        "required": ["description", "proTip", "attractions"]
    })
}
