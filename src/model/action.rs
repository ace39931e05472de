use super::*;

// プレイヤーが選択可能な操作
// 牌の指定はすべてTileIdで行う (赤,金,白ポッチの区別のため)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    // Turn Actions
    Draw,                             // ツモ
    Discard { id: TileId },           // 打牌
    Riichi { id: TileId },            // リーチ (宣言牌)
    OpenRiichi { id: TileId },        // オープンリーチ (宣言牌)
    Ankan { ids: Vec<TileId> },       // 暗槓
    Kakan { id: TileId },             // 加槓
    Tsumo { joker: Option<Tile> },    // ツモ和了 (白ポッチを使う場合は変化先の牌)
    ExtractFlower { id: TileId },     // 華牌抜き

    // Call Actions (標的の牌はstage.last_tileを参照)
    Pon { ids: Vec<TileId> },         // ポン (手牌から消費される2枚)
    Minkan { ids: Vec<TileId> },      // 明槓 (手牌から消費される3枚)
    Ron,                              // ロン
    Skip,                             // 鳴き,ロンの見送り
}

impl Action {
    #[inline]
    pub fn discard(id: TileId) -> Self {
        Self::Discard { id }
    }

    #[inline]
    pub fn riichi(id: TileId) -> Self {
        Self::Riichi { id }
    }

    #[inline]
    pub fn open_riichi(id: TileId) -> Self {
        Self::OpenRiichi { id }
    }

    #[inline]
    pub fn ankan(mut ids: Vec<TileId>) -> Self {
        ids.sort_unstable();
        Self::Ankan { ids }
    }

    #[inline]
    pub fn kakan(id: TileId) -> Self {
        Self::Kakan { id }
    }

    #[inline]
    pub fn tsumo() -> Self {
        Self::Tsumo { joker: None }
    }

    #[inline]
    pub fn pon(mut ids: Vec<TileId>) -> Self {
        ids.sort_unstable();
        Self::Pon { ids }
    }

    #[inline]
    pub fn minkan(mut ids: Vec<TileId>) -> Self {
        ids.sort_unstable();
        Self::Minkan { ids }
    }

    // 他家の打牌(加槓)に対する応答かどうか
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(
            self,
            Self::Pon { .. } | Self::Minkan { .. } | Self::Ron | Self::Skip
        )
    }

    // 複数の応答が競合した場合の優先度 (ロン > ポン,明槓 > 見送り)
    pub fn priority(&self) -> usize {
        match self {
            Self::Ron => 2,
            Self::Pon { .. } | Self::Minkan { .. } => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw => write!(f, "Draw"),
            Self::Discard { id } => write!(f, "Discard({})", id),
            Self::Riichi { id } => write!(f, "Riichi({})", id),
            Self::OpenRiichi { id } => write!(f, "OpenRiichi({})", id),
            Self::Ankan { ids } => write!(f, "Ankan{:?}", ids),
            Self::Kakan { id } => write!(f, "Kakan({})", id),
            Self::Tsumo { joker: Some(t) } => write!(f, "Tsumo({})", t),
            Self::Tsumo { joker: None } => write!(f, "Tsumo"),
            Self::ExtractFlower { id } => write!(f, "ExtractFlower({})", id),
            Self::Pon { ids } => write!(f, "Pon{:?}", ids),
            Self::Minkan { ids } => write!(f, "Minkan{:?}", ids),
            Self::Ron => write!(f, "Ron"),
            Self::Skip => write!(f, "Skip"),
        }
    }
}
