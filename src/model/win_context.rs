use super::*;

pub type Points = (Point, Point, Point); // (ロンの支払い, ツモ・子の支払い, ツモ・親の支払い)

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinContext {
    pub seat: Seat,                  // 和了者
    pub from: Option<Seat>,          // 放銃者 (ツモの場合None)
    pub hand: Vec<Tile>,             // 和了手牌(鳴きは含まない, 白ポッチは変化後)
    pub winning_tile: Tile,          // 和了牌
    pub yakus: Vec<(String, usize)>, // 役一覧(ドラを含む), Vec<(name, fan)>
    pub fan: usize,                  // 飜数(ドラを含む), 役満の場合は0
    pub yakuman: usize,              // 役満倍率 (0: 通常役, 1: 役満, 2: 二倍役満, ...)
    pub score: Point,                // 和了得点 (積み棒込み, 供託は含まない)
    pub points: Points,              // 支払い得点の内訳
    pub title: String,               // 満貫, 跳満, ...
    pub pao: Option<Seat>,           // 包の責任者
    pub chips: i32,                  // 祝儀枚数 (1人あたり)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawType {
    Exhaustive, // 荒牌平局
    Nagashi,    // 流し満貫
}

impl fmt::Display for DrawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DrawType::Exhaustive => "荒牌平局",
                DrawType::Nagashi => "流し満貫",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    pub context: WinContext,
    pub deltas: [Point; SEAT],    // 点数の変動 (供託を含む)
    pub chip_deltas: [i32; SEAT], // 祝儀の変動
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub draw_type: DrawType,
    pub tenpai: [bool; SEAT],  // 流局時の聴牌者
    pub nagashi: Vec<Seat>,    // 流し満貫の達成者
    pub deltas: [Point; SEAT], // ノーテン罰符,流し満貫による点数変動
}

// 局の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoundResult {
    Win(WinResult),
    Draw(DrawResult),
}

impl RoundResult {
    pub fn deltas(&self) -> [Point; SEAT] {
        match self {
            RoundResult::Win(w) => w.deltas,
            RoundResult::Draw(d) => d.deltas,
        }
    }

    // 親の連荘判定
    pub fn is_dealer_repeat(&self, dealer: Seat) -> bool {
        match self {
            RoundResult::Win(w) => w.context.seat == dealer,
            RoundResult::Draw(d) => match d.draw_type {
                DrawType::Nagashi => d.nagashi.contains(&dealer),
                DrawType::Exhaustive => d.tenpai[dealer],
            },
        }
    }
}
