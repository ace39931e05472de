use super::*;

// ルール設定. JSONから読み込む場合,指定のない項目はデフォルト値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub initial_score: Score,    // 配給原点
    pub settlement_score: Score, // 返し点
    pub riichi_cost: Score,      // リーチ供託
    pub honba_bonus: Point,      // 積み棒1本あたりの加算
    pub noten_penalty: Point,    // ノーテン罰符 (場に出る点数)
    pub chip_value: i32,         // チップ1枚あたりのpt
    pub bust: bool,              // 飛び終了
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            initial_score: 50000,
            settlement_score: 50000,
            riichi_cost: 1000,
            honba_bonus: 1000,
            noten_penalty: 2000,
            chip_value: 5,
            bust: true,
        }
    }
}

impl Rule {
    pub fn from_json(json: &str) -> Result<Self, crate::util::error::Error> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_rule() {
        let rule = Rule::from_json(r#"{"initial_score": 35000, "bust": false}"#).unwrap();
        assert_eq!(rule.initial_score, 35000);
        assert!(!rule.bust);
        assert_eq!(rule.settlement_score, 50000);
        assert_eq!(rule.chip_value, 5);
    }
}
