use std::collections::VecDeque;

use super::*;

// [Wall]
// 王牌14枚 = 嶺上牌4枚 + ドラ表示牌10枚 (表,裏の順に5組)
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    pub live: VecDeque<TileInstance>,         // ツモ山 (先頭から順にツモ)
    pub dead: Vec<TileInstance>,              // ドラ表示牌 [ドラ0, 裏0, ドラ1, 裏1, ...]
    pub replacements: VecDeque<TileInstance>, // 嶺上牌
    pub revealed: usize,                      // 公開済みのドラ表示牌の組数
    pub dead_budget: usize,                   // 王牌の残り枚数 (華牌抜きで減少, 下限あり)
}

impl Wall {
    // シャッフル済みの牌列から山を構築. 末尾14枚を王牌とする
    pub fn from_tiles(mut tiles: Vec<TileInstance>) -> Self {
        let n = tiles.len().saturating_sub(DEAD_WALL);
        let mut dead_wall = tiles.split_off(n);
        let dead = dead_wall.split_off(REPLACEMENT.min(dead_wall.len()));
        Self {
            live: tiles.into(),
            dead,
            replacements: dead_wall.into(),
            revealed: 1,
            dead_budget: DEAD_WALL,
        }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.live.len()
    }

    // Noneの場合は荒牌(流局)
    pub fn draw(&mut self) -> Option<TileInstance> {
        self.live.pop_front()
    }

    // Noneの場合は嶺上牌の枯渇 (流局として扱う)
    pub fn draw_replacement(&mut self) -> Option<TileInstance> {
        self.replacements.pop_front()
    }

    // 華牌抜き. 補充は嶺上牌から
    pub fn extract_flower(&mut self) -> Option<TileInstance> {
        self.dead_budget = self.dead_budget.saturating_sub(1).max(DEAD_WALL_MIN);
        self.draw_replacement()
    }

    // 槓ドラをめくる. 公開したドラ表示牌を返却
    pub fn reveal_kan_dora(&mut self) -> Option<TileInstance> {
        if self.revealed * 2 >= self.dead.len() {
            return None;
        }
        self.revealed += 1;
        self.dead.get((self.revealed - 1) * 2).copied()
    }

    pub fn dora_indicators(&self) -> Vec<TileInstance> {
        self.dead.iter().step_by(2).take(self.revealed).copied().collect()
    }

    pub fn ura_indicators(&self) -> Vec<TileInstance> {
        self.dead
            .iter()
            .skip(1)
            .step_by(2)
            .take(self.revealed)
            .copied()
            .collect()
    }

    pub fn doras(&self) -> Vec<Tile> {
        indicators_to_doras(&self.dora_indicators())
    }

    pub fn ura_doras(&self) -> Vec<Tile> {
        indicators_to_doras(&self.ura_indicators())
    }

    pub fn instances(&self) -> impl Iterator<Item = &TileInstance> {
        self.live
            .iter()
            .chain(self.dead.iter())
            .chain(self.replacements.iter())
    }
}

fn indicators_to_doras(inds: &[TileInstance]) -> Vec<Tile> {
    inds.iter().filter_map(|t| t.tile.dora_successor()).collect()
}
