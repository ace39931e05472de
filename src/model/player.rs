use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,                           // 座席番号(場・局が変わってもゲーム終了まで不変)
    pub name: String,                         // プレイヤー名
    pub wind: Tnum,                           // 自風 (WE | WS | WW)
    pub score: Score,                         // 得点
    pub chips: i32,                           // 祝儀(チップ)の累計
    pub hand: Vec<TileInstance>,              // 手牌(ツモ牌を含まない, ソート済み)
    pub drawn: Option<TileInstance>,          // ツモ牌
    pub discards: Vec<Discard>,               // 捨て牌一覧
    pub melds: Vec<Meld>,                     // 鳴き一覧
    pub flowers: Vec<TileInstance>,           // 抜いた華牌
    pub pending_flowers: Vec<TileInstance>,   // 抜き待ちの華牌 (先頭から処理)

    // 条件役用のフラグ
    pub is_riichi: bool,        // リーチ (ダブル,オープンを含む)
    pub is_open_riichi: bool,   // オープンリーチ
    pub is_double_riichi: bool, // ダブルリーチ
    pub is_ippatsu: bool,       // 一発 リーチ後にセットして次の打牌(自他問わず),鳴き,槓でfalse
    pub is_menzen: bool,        // 門前
    pub is_nagashi: bool,       // 流し満貫の資格
    pub is_first_turn: bool,    // 第一打牌前 (天和,地和,人和,ダブルリーチ用)
    pub is_rinshan: bool,       // 嶺上牌をツモった直後 打牌でfalse
}

impl Player {
    pub fn new(seat: Seat, name: &str, score: Score) -> Self {
        Self {
            seat,
            name: name.to_string(),
            score,
            ..Default::default()
        }
    }

    // 局開始時に局内の状態をリセット
    pub fn reset(&mut self, wind: Tnum) {
        *self = Self {
            seat: self.seat,
            name: std::mem::take(&mut self.name),
            wind,
            score: self.score,
            chips: self.chips,
            is_menzen: true,
            is_nagashi: true,
            is_first_turn: true,
            ..Default::default()
        };
    }

    // 手牌+ツモ牌
    pub fn concealed(&self) -> Vec<TileInstance> {
        let mut v = self.hand.clone();
        if let Some(d) = self.drawn {
            v.push(d);
        }
        v
    }

    pub fn concealed_table(&self) -> TileTable {
        tiles_to_table(self.hand.iter().chain(self.drawn.iter()))
    }

    pub fn hand_table(&self) -> TileTable {
        tiles_to_table(&self.hand)
    }

    pub fn count_tile(&self, t: Tile) -> usize {
        self.hand
            .iter()
            .chain(self.drawn.iter())
            .filter(|x| x.tile == t)
            .count()
    }

    pub fn find_instance(&self, id: TileId) -> Option<TileInstance> {
        self.hand
            .iter()
            .chain(self.drawn.iter())
            .find(|x| x.id == id)
            .copied()
    }

    // 手牌またはツモ牌から指定idの牌を取り除く
    pub fn take_instance(&mut self, id: TileId) -> Option<TileInstance> {
        if let Some(d) = self.drawn {
            if d.id == id {
                self.drawn = None;
                return Some(d);
            }
        }
        let i = self.hand.iter().position(|x| x.id == id)?;
        Some(self.hand.remove(i))
    }

    pub fn add_to_hand(&mut self, t: TileInstance) {
        let i = self.hand.partition_point(|x| x < &t);
        self.hand.insert(i, t);
    }

    // ツモ牌を手牌に加える
    pub fn merge_drawn(&mut self) {
        if let Some(d) = self.drawn.take() {
            self.add_to_hand(d);
        }
    }

    pub fn discard_tiles(&self) -> Vec<Tile> {
        self.discards.iter().map(|d| d.tile.tile).collect()
    }

    pub fn kan_count(&self) -> usize {
        self.melds
            .iter()
            .filter(|m| m.meld_type != MeldType::Pon)
            .count()
    }

    pub fn all_instances(&self) -> Vec<TileInstance> {
        let mut v = self.concealed();
        for m in &self.melds {
            v.extend(m.tiles.iter().copied());
        }
        v
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let drawn = if let Some(d) = self.drawn {
            d.to_string()
        } else {
            "None".to_string()
        };
        writeln!(
            f,
            "seat: {}, name: {}, wind: z{}, score: {}, chips: {}, drawn: {}",
            self.seat, self.name, self.wind, self.score, self.chips, drawn,
        )?;
        writeln!(
            f,
            "riichi: {}, open: {}, ippatsu: {}, menzen: {}, nagashi: {}, flowers: {}",
            self.is_riichi,
            self.is_open_riichi,
            self.is_ippatsu,
            self.is_menzen,
            self.is_nagashi,
            self.flowers.len(),
        )?;
        writeln!(f, "hand: {}", vec_to_string(&self.hand))?;
        writeln!(f, "melds: {}", vec_to_string(&self.melds))?;
        write!(f, "discards: {}", vec_to_string(&self.discards))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discard {
    pub tile: TileInstance,
    pub is_riichi: bool,          // リーチ宣言牌
    pub is_tsumogiri: bool,       // ツモ切りフラグ
    pub called_by: Option<Seat>,  // 鳴きが入った場合にセット (牌は鳴いたプレイヤーの面子に移動)
    pub is_oshidashi: bool,       // オープンリーチ者への押し出し
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tile)?;
        if self.is_riichi {
            write!(f, "*")?;
        }
        if self.called_by.is_some() {
            write!(f, "^")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Pon,
    Minkan,
    Ankan,
    Kakan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<TileInstance>,
    pub from: Option<Seat>,       // 鳴いた相手 (暗槓はNone)
    pub called: Option<TileId>,   // 鳴いた牌
}

impl Meld {
    #[inline]
    pub fn tile(&self) -> Tile {
        self.tiles[0].tile
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.meld_type != MeldType::Ankan
    }

    #[inline]
    pub fn is_kan(&self) -> bool {
        self.meld_type != MeldType::Pon
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.tiles.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", s.join("|"))?;
        if let Some(from) = self.from {
            write!(f, "({})", from)?;
        }
        Ok(())
    }
}
