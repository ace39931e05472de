use super::*;

// StageControllerからListenerに通知されるイベント
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Begin(EventBegin),     // ゲーム開始
    New(EventNew),         // 局開始
    Action(EventAction),   // 操作の確定
    Dora(EventDora),       // 新ドラ
    Win(EventWin),         // 局終了 (和了)
    Draw(EventDraw),       // 局終了 (流局)
    End(EventEnd),         // ゲーム終了
}

impl Event {
    #[inline]
    pub fn begin() -> Self {
        Self::Begin(EventBegin {})
    }

    #[inline]
    pub fn new(round: Round, dealer: Seat, honba: usize, kyotaku: usize) -> Self {
        Self::New(EventNew {
            round,
            dealer,
            honba,
            kyotaku,
        })
    }

    #[inline]
    pub fn action(seat: Seat, action: Action) -> Self {
        Self::Action(EventAction { seat, action })
    }

    #[inline]
    pub fn dora(tile: TileInstance) -> Self {
        Self::Dora(EventDora { tile })
    }

    #[inline]
    pub fn win(result: WinResult, ura_doras: Vec<TileInstance>) -> Self {
        Self::Win(EventWin { result, ura_doras })
    }

    #[inline]
    pub fn draw(result: DrawResult) -> Self {
        Self::Draw(EventDraw { result })
    }

    #[inline]
    pub fn end(settlement: Vec<SettlementEntry>) -> Self {
        Self::End(EventEnd { settlement })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBegin {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventNew {
    pub round: Round,   // 場,局
    pub dealer: Seat,   // 親
    pub honba: usize,   // 本場
    pub kyotaku: usize, // 供託(リーチ棒)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAction {
    pub seat: Seat,
    pub action: Action,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDora {
    pub tile: TileInstance, // 新ドラ表示牌
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWin {
    pub result: WinResult,
    pub ura_doras: Vec<TileInstance>, // 裏ドラ表示牌
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraw {
    pub result: DrawResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnd {
    pub settlement: Vec<SettlementEntry>, // 順位順の精算結果
}

// 終局時の精算 (1人分)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementEntry {
    pub seat: Seat,
    pub rank: usize,  // 順位 (0始まり)
    pub score: Score, // 最終持ち点
    pub raw: f64,     // (持ち点 - 返し点) / 1000
    pub uma: f64,     // 順位ウマ
    pub chips: i32,   // 祝儀枚数
    pub total: f64,   // 最終pt
}
