use crate::model::*;

use super::win::{is_chiitoitsu_win, is_kokushimusou_win};

use SetPairType::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetPairType {
    Pair,    // 雀頭
    Shuntsu, // 順子
    Koutsu,  // 刻子
    Pon,     // ポン
    Minkan,  // 明槓 (大明槓 + 加槓)
    Ankan,   // 暗槓
}

// Tileは順子の場合は先頭の牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPair(pub SetPairType, pub Tile);

impl SetPair {
    #[inline]
    pub fn is_triplet(&self) -> bool {
        matches!(self.0, Koutsu | Pon | Minkan | Ankan)
    }

    #[inline]
    pub fn is_kan(&self) -> bool {
        matches!(self.0, Minkan | Ankan)
    }

    // 構成牌 (槓子は3枚として扱う)
    pub fn tiles(&self) -> Vec<Tile> {
        let t = self.1;
        match self.0 {
            Pair => vec![t, t],
            Shuntsu => vec![t, Tile(t.0, t.1 + 1), Tile(t.0, t.1 + 2)],
            _ => vec![t, t, t],
        }
    }
}

pub type ParsedHand = Vec<SetPair>;

// 鳴きをSetPairに変換したリストを返却
pub fn parse_melds(melds: &[Meld]) -> ParsedHand {
    melds
        .iter()
        .map(|m| {
            let t = m.tile();
            match m.meld_type {
                MeldType::Pon => SetPair(Pon, t),
                MeldType::Minkan | MeldType::Kakan => SetPair(Minkan, t),
                MeldType::Ankan => SetPair(Ankan, t),
            }
        })
        .collect()
}

// 雀頭を除いた牌を先頭から刻子,順子の順に取り出して分解する (バックトラック)
fn parse_into_sets(tt: &mut TileTable, cur: &mut ParsedHand, res: &mut Vec<ParsedHand>) {
    let first = (0..TYPE)
        .flat_map(|ti| (1..TNUM).map(move |ni| (ti, ni)))
        .find(|&(ti, ni)| tt[ti][ni] > 0);
    let (ti, ni) = match first {
        Some(x) => x,
        None => {
            res.push(cur.clone());
            return;
        }
    };

    // 刻子
    if tt[ti][ni] >= 3 {
        tt[ti][ni] -= 3;
        cur.push(SetPair(Koutsu, Tile(ti, ni)));
        parse_into_sets(tt, cur, res);
        cur.pop();
        tt[ti][ni] += 3;
    }

    // 順子 (字牌は除外)
    if ti != TZ && ni <= 7 && tt[ti][ni + 1] > 0 && tt[ti][ni + 2] > 0 {
        for k in 0..3 {
            tt[ti][ni + k] -= 1;
        }
        cur.push(SetPair(Shuntsu, Tile(ti, ni)));
        parse_into_sets(tt, cur, res);
        cur.pop();
        for k in 0..3 {
            tt[ti][ni + k] += 1;
        }
    }
}

// 手牌が完成形(七対子・国士無双は除く)なら面子+雀頭に分解したすべての組み合わせを返却
pub fn parse_into_normal_win(hand: &TileTable) -> Vec<ParsedHand> {
    let mut tt = *hand;
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if tt[ti][ni] < 2 {
                continue;
            }
            tt[ti][ni] -= 2;
            let mut cur = vec![SetPair(Pair, Tile(ti, ni))];
            parse_into_sets(&mut tt, &mut cur, &mut res);
            tt[ti][ni] += 2;
        }
    }
    res
}

// 手牌が完成形(七対子)ならすべて対子に分解して返却. 4枚使いは対子2つ
pub fn parse_into_chiitoitsu_win(hand: &TileTable) -> Vec<ParsedHand> {
    if !is_chiitoitsu_win(hand) {
        return vec![];
    }
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            for _ in 0..hand[ti][ni] / 2 {
                res.push(SetPair(Pair, Tile(ti, ni)));
            }
        }
    }
    vec![res]
}

// 手牌が完成形(国士無双)なら空のParsedHandが入ったリストを返却
pub fn parse_into_kokushimusou_win(hand: &TileTable) -> Vec<ParsedHand> {
    if is_kokushimusou_win(hand) {
        vec![vec![]]
    } else {
        vec![]
    }
}

// 門前の手牌と鳴きから和了形のすべての分解を返却
// 七対子と国士無双は鳴きがない場合のみ
pub fn enumerate_decompositions(hand: &TileTable, melds: &[Meld]) -> Vec<ParsedHand> {
    let meld_sets = parse_melds(melds);
    let mut res = vec![];
    for mut ph in parse_into_normal_win(hand) {
        ph.extend(meld_sets.iter().copied());
        res.push(ph);
    }
    if melds.is_empty() {
        res.extend(parse_into_chiitoitsu_win(hand));
        res.extend(parse_into_kokushimusou_win(hand));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(exp: &str) -> TileTable {
        let tiles: Vec<Tile> = exp
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        symbols_to_table(&tiles)
    }

    #[test]
    fn test_sanrenkou_ambiguity() {
        // 三連刻と一盃口系の2通り
        let tt = table("p1 p1 p1 p2 p2 p2 p3 p3 p3 s5 s6 s7 z1 z1");
        let phs = enumerate_decompositions(&tt, &[]);
        assert_eq!(phs.len(), 2);
        for ph in &phs {
            assert_eq!(ph.len(), 5);
        }
    }

    #[test]
    fn test_ryanpeikou_and_chiitoitsu() {
        let tt = table("p1 p1 p2 p2 p3 p3 s5 s5 s6 s6 s7 s7 z1 z1");
        let phs = enumerate_decompositions(&tt, &[]);
        // 二盃口形 + 七対子形
        assert_eq!(phs.len(), 2);
        assert!(phs.iter().any(|ph| ph.iter().all(|sp| sp.0 == Pair)));
    }

    #[test]
    fn test_not_complete() {
        let tt = table("p1 p2 p4 p5 p7 p8 s1 s2 s4 s5 z1 z2 z3 z4");
        assert!(enumerate_decompositions(&tt, &[]).is_empty());
    }
}
