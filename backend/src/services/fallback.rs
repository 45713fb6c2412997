use shared::content::{ImageReference, TravelTip};

struct StaticTip {
    description: &'static str,
    pro_tip: &'static str,
    attractions: [&'static str; 3],
}

impl StaticTip {
    fn to_tip(&self) -> TravelTip {
        TravelTip {
            description: self.description.to_string(),
            pro_tip: self.pro_tip.to_string(),
            attractions: self.attractions.iter().map(|a| a.to_string()).collect(),
        }
    }
}

// Keys are full slice names; lookups match when the key is contained in the query.
const STATIC_TIPS: [(&str, StaticTip); 10] = [
    ("佘山国家森林公园", StaticTip {
        description: "上海唯一的自然山林胜地，拥有著名的天文台和圣母大殿。在这里可以俯瞰魔都平原，感受历史与自然的交融。",
        pro_tip: "建议从西佘山进，东佘山出。天文台需要单独预约，日落时分在山顶看夕阳非常出片！",
        attractions: ["佘山天文台", "秀道者塔", "天主教圣母大殿"],
    }),
    ("东平国家森林公园", StaticTip {
        description: "位于崇明岛上的天然氧吧，杉树林高耸入云，非常适合骑行和烧烤。逃离城市喧嚣的绝佳去处。",
        pro_tip: "这里的房车营地非常火爆，想过夜一定要提前两周预订。带上野餐垫，草坪非常大！",
        attractions: ["水杉大道", "房车露营地", "孔雀园"],
    }),
    ("滨江森林公园", StaticTip {
        description: "位于黄浦江、长江、东海三水交汇处。这里有上海最长的江岸线，保留了大量原生植被。",
        pro_tip: "春天是看杜鹃花的好季节。公园最北端的观海平台可以看到壮观的'三水并流'。",
        attractions: ["滨江岸线", "杜鹃园", "果园采摘"],
    }),
    ("辰山植物园", StaticTip {
        description: "华东地区规模最大的植物园，拥有壮观的矿坑花园和巨大的温室群。一年四季花开不断。",
        pro_tip: "一定要去3号门的矿坑花园打卡，拍照自带废土风滤镜。温室里的仙人掌也是网红打卡点。",
        attractions: ["矿坑花园", "热带花果馆", "孤生石"],
    }),
    ("共青森林公园", StaticTip {
        description: "充满法式浪漫的森林公园，小火车和跑马场是童年回忆。这里有着如油画般的莫奈花园景观。",
        pro_tip: "想要拍出'莫奈花园'的感觉，建议清晨或傍晚去华明桥附近的河边。记得带驱蚊水！",
        attractions: ["森林小火车", "华明桥", "松涛幽谷"],
    }),
    ("海湾国家森林公园", StaticTip {
        description: "上海最大的人工森林，此时正是赏梅的好去处。既有森林的静谧，又有湖泊的灵动。",
        pro_tip: "公园非常大，强烈建议租一辆自行车或者购买电瓶车票。可以在湖上划皮划艇。",
        attractions: ["梅园", "白鸟湖", "森林卡丁车"],
    }),
    ("顾村公园", StaticTip {
        description: "上海赏樱的代名词。每年樱花节人山人海，但粉色的花海确实浪漫至极。",
        pro_tip: "如果不喜欢人挤人，可以避开樱花节主会场，去二期区域，那里也有很多樱花且人少。",
        attractions: ["樱花林", "恐龙园", "悦林湖"],
    }),
    ("世纪公园", StaticTip {
        description: "市中心的绿肺，交通最便利的大型公园。有着大片的草坪和镜天湖，是周末野餐的首选。",
        pro_tip: "可以租一辆多人自行车环湖骑行。公园周围有很多不错的美术馆和餐厅，可以安排一日游。",
        attractions: ["镜天湖", "世纪花钟", "蒙特利尔园"],
    }),
    ("世博文化公园-双子山", StaticTip {
        description: "上海市区最新的人造山地标，在平原上拔地而起的'双子星'。可以体验在市中心登山的奇妙感觉。",
        pro_tip: "登山需要提前小程序预约！山顶视野极佳，可以同框拍摄卢浦大桥和陆家嘴三件套。",
        attractions: ["山顶观景台", "十一孔桥", "温室花园"],
    }),
    ("工作累了，周末哪也不想去", StaticTip {
        description: "最舒适的五星级景点——你的家。这里没有拥挤的人潮，只有无限的WiFi和快乐肥宅水。",
        pro_tip: "把手机调成静音，点一份平时舍不得点的豪华外卖，找一部长电影，享受躺平的艺术。",
        attractions: ["温暖的被窝", "外卖APP", "Netflix/B站"],
    }),
];

const STATIC_IMAGES: [(&str, &str); 10] = [
    ("佘山国家森林公园", "https://images.unsplash.com/photo-1542224566-6e85f2e6772f?q=80&w=800&auto=format&fit=crop"),
    ("东平国家森林公园", "https://images.unsplash.com/photo-1448375240586-dfd8d395ea6c?q=80&w=800&auto=format&fit=crop"),
    ("滨江森林公园", "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?q=80&w=800&auto=format&fit=crop"),
    ("辰山植物园", "https://images.unsplash.com/photo-1620310860368-29a320349f7e?q=80&w=800&auto=format&fit=crop"),
    ("共青森林公园", "https://images.unsplash.com/photo-1511497584788-876760111969?q=80&w=800&auto=format&fit=crop"),
    ("海湾国家森林公园", "https://images.unsplash.com/photo-1465146344425-f00d5f5c8f07?q=80&w=800&auto=format&fit=crop"),
    ("顾村公园", "https://images.unsplash.com/photo-1522383225653-ed111181a951?q=80&w=800&auto=format&fit=crop"),
    ("世纪公园", "https://images.unsplash.com/photo-1596327027874-9f7962df9449?q=80&w=800&auto=format&fit=crop"),
    ("世博文化公园-双子山", "https://images.unsplash.com/photo-1506744038136-46273834b3fb?q=80&w=800&auto=format&fit=crop"),
    ("工作累了，周末哪也不想去", "https://images.unsplash.com/photo-1528696892704-5e1122852276?q=80&w=800&auto=format&fit=crop"),
];

pub const GENERIC_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1474181487882-5abf3f0ba6c2?q=80&w=800&auto=format&fit=crop";

const GENERIC_PRO_TIP: &str = "建议查看天气预报，并带好防晒用品。";
const GENERIC_ATTRACTIONS: [&str; 3] = ["标志性景观", "休闲步道", "周边美食"];

/// First entry whose key occurs inside `name`, in table order.
fn first_contained<'a, T>(table: &'a [(&str, T)], name: &str) -> Option<&'a T> {
    table
        .iter()
        .find(|(key, _)| name.contains(key))
        .map(|(_, value)| value)
}

pub fn generic_tip(name: &str) -> TravelTip {
    TravelTip {
        description: format!("探索{}的美丽风光。这是一个放松身心的好去处。", name),
        pro_tip: GENERIC_PRO_TIP.to_string(),
        attractions: GENERIC_ATTRACTIONS.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn fallback_tip(name: &str) -> TravelTip {
    first_contained(&STATIC_TIPS, name)
        .map(StaticTip::to_tip)
        .unwrap_or_else(|| generic_tip(name))
}

pub fn fallback_image(name: &str) -> ImageReference {
    let uri = first_contained(&STATIC_IMAGES, name).copied().unwrap_or(GENERIC_IMAGE_URL);
    ImageReference::remote(uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::catalog::CATALOG;

    #[test]
    fn test_every_catalog_slice_has_static_content() {
        for slice in CATALOG.iter() {
            assert_ne!(fallback_tip(&slice.name), generic_tip(&slice.name), "{}", slice.name);
            assert_ne!(fallback_image(&slice.name).uri, GENERIC_IMAGE_URL, "{}", slice.name);
        }
    }

    #[test]
    fn test_lookup_is_containment_not_equality() {
        let tip = fallback_tip("周末去世纪公园野餐");
        assert_eq!(tip.attractions, vec!["镜天湖", "世纪花钟", "蒙特利尔园"]);
        assert!(!fallback_image("顾村公园樱花节").generated);
    }

    #[test]
    fn test_unknown_name_gets_generic_template() {
        let tip = fallback_tip("外滩");
        assert!(tip.description.contains("外滩"));
        assert_eq!(tip.pro_tip, GENERIC_PRO_TIP);
        assert_eq!(tip.attractions.len(), 3);
        assert_eq!(fallback_image("外滩").uri, GENERIC_IMAGE_URL);
    }

    #[test]
    fn test_stay_home_gets_its_own_entry() {
        let tip = fallback_tip("工作累了，周末哪也不想去");
        assert!(tip.attractions.contains(&"温暖的被窝".to_string()));
    }
}
