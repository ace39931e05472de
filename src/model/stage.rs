use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Waiting, // 対局開始前
    Dealing,  // 配牌
    Playing,  // 対局中
    RoundEnd, // 局終了
    GameEnd,  // 対局終了
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Draw, // ツモ待ち
    Action,  // ツモ後の操作待ち
    Discard, // 打牌に対する他家の応答待ち
    Chankan, // 加槓に対する槍槓の応答待ち
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub wind: Tnum,    // 場風 (WE | WS)
    pub number: usize, // 局 (1~3)
}

impl Default for Round {
    fn default() -> Self {
        Self { wind: WE, number: 1 }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = if self.wind == WE { "東" } else { "南" };
        write!(f, "{}{}局", w, self.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastTileKind {
    Discard, // 打牌
    Kakan,   // 加槓 (槍槓の対象)
}

// 他家にロン(鳴き)される可能性のある牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastTile {
    pub seat: Seat,
    pub tile: TileInstance,
    pub kind: LastTileKind,
    #[serde(default)]
    pub ippatsu: Option<Seat>, // この打牌で一発が消えたリーチ者 (この牌へのロンは一発)
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub rule: Rule,                      // ルール設定
    pub phase: Phase,                    // 対局の状態
    pub turn_phase: TurnPhase,           // 手番の状態
    pub round: Round,                    // 場,局
    pub honba: usize,                    // 本場
    pub kyotaku: usize,                  // リーチ棒の供託
    pub players: [Player; SEAT],         // 各プレイヤー情報
    pub wall: Wall,                      // 牌山
    pub turn: Seat,                      // 手番のプレイヤーの座席
    pub dealer: Seat,                    // 親の座席
    pub last_tile: Option<LastTile>,     // 応答待ちの牌
    pub kan_count: usize,                // 局内の槓の回数
    pub remaining_draws: usize,          // ツモ山の残り枚数
    pub result: Option<RoundResult>,     // 局の結果
    pub step: usize,                     // ステップ execute毎に+1する
}

impl Stage {
    pub fn new(names: [&str; SEAT], rule: Rule) -> Self {
        let mut stg = Self {
            rule,
            ..Default::default()
        };
        for s in 0..SEAT {
            stg.players[s] = Player::new(s, names[s], stg.rule.initial_score);
            stg.players[s].wind = stg.get_seat_wind(s);
        }
        stg
    }

    #[inline]
    pub fn is_dealer(&self, seat: Seat) -> bool {
        seat == self.dealer
    }

    #[inline]
    pub fn get_prevalent_wind(&self) -> Tnum {
        self.round.wind
    }

    #[inline]
    pub fn get_seat_wind(&self, seat: Seat) -> Tnum {
        (seat + SEAT - self.dealer) % SEAT + 1 // WE | WS | WW
    }

    pub fn get_scores(&self) -> [Score; SEAT] {
        let mut scores = [0; SEAT];
        for s in 0..SEAT {
            scores[s] = self.players[s].score;
        }
        scores
    }

    pub fn is_game_end(&self) -> bool {
        self.phase == Phase::GameEnd
    }

    // 和了時に一発が成立するか
    // 他家の打牌で一発は消えるが,その牌へのロンは一発として扱う
    pub fn is_ippatsu(&self, seat: Seat) -> bool {
        self.players[seat].is_ippatsu
            || self.last_tile.map_or(false, |lt| lt.ippatsu == Some(seat))
    }

    // オープンリーチ中のプレイヤー
    pub fn open_riichi_seats(&self) -> Vec<Seat> {
        (0..SEAT)
            .filter(|&s| self.players[s].is_open_riichi)
            .collect()
    }

    // 華牌抜きが必要なプレイヤー (手番のプレイヤーから順に探索)
    pub fn flower_pending_seat(&self) -> Option<Seat> {
        (0..SEAT)
            .map(|i| (self.turn + i) % SEAT)
            .find(|&s| !self.players[s].pending_flowers.is_empty())
    }

    pub fn to_json(&self) -> Result<String, crate::util::error::Error> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "round: {}, dealer: {}, honba: {}, kyotaku: {}, phase: {:?}/{:?}",
            self.round, self.dealer, self.honba, self.kyotaku, self.phase, self.turn_phase,
        )?;
        writeln!(
            f,
            "turn: {}, remaining: {}, kan: {}, doras: {}, last_tile: {:?}",
            self.turn,
            self.remaining_draws,
            self.kan_count,
            vec_to_string(&self.wall.dora_indicators()),
            self.last_tile.map(|l| l.tile.to_string()),
        )?;

        let boader = "-".to_string().repeat(80);
        write!(f, "{}", boader)?;
        for p in &self.players {
            writeln!(f)?;
            writeln!(f, "{}", p)?;
            write!(f, "{}", boader)?;
        }
        writeln!(f)
    }
}
