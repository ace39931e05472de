use crate::model::*;

// [完成形判定 (面子, 雀頭)]

// それぞれの牌種について"枚数を3で割った余り"と"余り数の集計"を返却
pub fn calc_mods_cnts(hand: &TileTable) -> ([usize; TYPE], [usize; 3]) {
    let mut mods = [0; TYPE];
    for ti in 0..TYPE {
        mods[ti] = hand[ti][1..TNUM].iter().sum();
        mods[ti] %= 3;
    }

    let mut cnts = [0; 3];
    for ti in 0..TYPE {
        cnts[mods[ti]] += 1;
    }

    (mods, cnts)
}

// 面子のみで構成されているかの判定
pub fn is_sets(tr: &TileRow, ti: Type) -> bool {
    let (mut n0, mut n1, mut n2);
    n0 = tr[1];
    n1 = tr[2];
    for i in 1..8 {
        n2 = tr[i + 2];
        let n = n0 % 3;
        if (ti == TZ && n != 0) || (n1 < n || n2 < n) {
            return false;
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    n0 % 3 == 0 && n1 % 3 == 0
}

// 牌種が完成面子+雀頭の場合において雀頭候補となる牌を返す
// [1,4,7], [2,5,8], [3,6,9] のいずれか
pub fn calc_pair_candidate_index(tr: &TileRow) -> Vec<Tnum> {
    // 面子の和は3で割り切れるので余りの値によって雀頭候補を絞り込める
    let mut sum = 0;
    for i in 1..TNUM {
        sum += i * tr[i];
    }
    let mod3 = sum % 3;
    (1..4).map(|i| 3 * i - mod3).collect()
}

// 牌種が完成面子+雀頭のみで構成されている場合,雀頭のリストを返す.
pub fn calc_pair_candidate(tr: &TileRow, ti: Type) -> Vec<Tile> {
    let mut tr = *tr;
    let mut res = vec![];
    for ni in calc_pair_candidate_index(&tr) {
        if tr[ni] < 2 {
            continue;
        }
        tr[ni] -= 2;
        if is_sets(&tr, ti) {
            res.push(Tile(ti, ni));
        }
        tr[ni] += 2;
    }

    res
}

// 14 - (副露数) * 3 枚の手牌において和了形である場合,雀頭候補のリストを返却
pub fn calc_possibole_pairs(hand: &TileTable) -> Vec<Tile> {
    let (mods, cnts) = calc_mods_cnts(hand);
    let mut res = vec![];

    if cnts[1] != 0 || cnts[2] != 1 {
        return vec![];
    }

    for ti in 0..TYPE {
        if mods[ti] == 2 {
            let pairs = calc_pair_candidate(&hand[ti], ti);
            if pairs.is_empty() {
                return vec![];
            }
            res = pairs;
        } else if !is_sets(&hand[ti], ti) {
            return vec![];
        }
    }

    res
}

// [和了形判定]

// 通常形
pub fn is_normal_win(hand: &TileTable) -> bool {
    !calc_possibole_pairs(hand).is_empty()
}

// 七対子 (同じ牌4枚は2対子として扱う)
pub fn is_chiitoitsu_win(hand: &TileTable) -> bool {
    let mut n_pair = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match hand[ti][ni] {
                0 => {}
                2 => n_pair += 1,
                4 => n_pair += 2,
                _ => return false,
            }
        }
    }
    n_pair == 7
}

// 国士無双
pub fn is_kokushimusou_win(hand: &TileTable) -> bool {
    let mut count = 0;
    for ti in 0..TZ {
        if hand[ti][1] == 0 || hand[ti][9] == 0 {
            return false;
        }
        for ni in 2..9 {
            if hand[ti][ni] != 0 {
                return false;
            }
        }
        count += hand[ti][1] + hand[ti][9]
    }
    for ni in WE..=DR {
        if hand[TZ][ni] == 0 {
            return false;
        }
        count += hand[TZ][ni]
    }

    count == 14
}

// 門前の手牌(3k+2枚)が和了形かどうか
pub fn is_complete(hand: &TileTable) -> bool {
    let n = count_table(hand);
    if n % 3 != 2 {
        return false;
    }
    if is_normal_win(hand) {
        return true;
    }
    n == 14 && (is_chiitoitsu_win(hand) || is_kokushimusou_win(hand))
}

// [和了牌判定]
// 3k+1枚の手牌に対して和了牌のリストを返却 (27種の総当たり)
pub fn calc_waiting_tiles(hand: &TileTable) -> Vec<Tile> {
    let mut hand = *hand;
    let mut res = vec![];
    for t in LEGAL_TILES {
        hand[t.0][t.1] += 1;
        if is_complete(&hand) {
            res.push(t);
        }
        hand[t.0][t.1] -= 1;
    }
    res
}

#[inline]
pub fn is_tenpai(hand: &TileTable) -> bool {
    !calc_waiting_tiles(hand).is_empty()
}

// 自分の捨て牌によるフリテン
pub fn is_furiten(hand: &TileTable, discards: &[Tile]) -> bool {
    calc_waiting_tiles(hand)
        .iter()
        .any(|t| discards.contains(t))
}

// [聴牌捨て牌判定]
// ツモ番(3k+2枚)において聴牌となる打牌と待ちの組み合わせの一覧を返却
pub fn calc_discards_to_tenpai(hand: &TileTable) -> Vec<(Tile, Vec<Tile>)> {
    let mut res = vec![];
    let mut hand = *hand;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if hand[ti][ni] > 0 {
                hand[ti][ni] -= 1;
                let v = calc_waiting_tiles(&hand);
                if !v.is_empty() {
                    res.push((Tile(ti, ni), v));
                }
                hand[ti][ni] += 1;
            }
        }
    }
    res
}

// 白ポッチを1枚含む和了形判定用の手牌(3k+2枚)に対して,ポッチの変化先として和了形となる牌の一覧を返却
// ポッチを白のまま使う場合は含まない
pub fn calc_joker_targets(hand: &TileTable) -> Vec<Tile> {
    let mut hand = *hand;
    if hand[TZ][DW] == 0 {
        return vec![];
    }
    hand[TZ][DW] -= 1;
    calc_waiting_tiles(&hand)
        .into_iter()
        .filter(|&t| t != Tile(TZ, DW))
        .collect()
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
    fn test_is_complete() {
        assert!(is_complete(&table(
            "p1 p2 p3 p4 p5 p6 s7 s8 s9 z1 z1 z1 m9 m9"
        )));
        assert!(is_complete(&table("p1 p1 p1 p2 p3")));
        assert!(!is_complete(&table(
            "p1 p2 p3 p4 p5 p6 s7 s8 s9 z1 z1 z2 m9 m9"
        )));
        // 萬子は順子を作れない
        assert!(!is_complete(&table(
            "m1 m9 m9 p1 p2 p3 p4 p5 p6 s7 s8 s9 z1 z1"
        )));
    }

    #[test]
    fn test_chiitoitsu() {
        assert!(is_complete(&table(
            "p1 p1 p3 p3 s2 s2 s5 s5 z1 z1 z6 z6 m9 m9"
        )));
        // 4枚使い
        assert!(is_chiitoitsu_win(&table(
            "p1 p1 p1 p1 s2 s2 s5 s5 z1 z1 z6 z6 m9 m9"
        )));
    }

    #[test]
    fn test_kokushimusou() {
        let tt = table("m1 m9 p1 p9 s1 s9 z1 z2 z3 z4 z5 z6 z7 z7");
        assert!(is_kokushimusou_win(&tt));
        assert!(is_complete(&tt));
        let waits = calc_waiting_tiles(&table("m1 m9 p1 p9 s1 s9 z1 z2 z3 z4 z5 z6 z7"));
        assert_eq!(waits.len(), 13);
    }

    #[test]
    fn test_waiting_tiles() {
        let waits = calc_waiting_tiles(&table("p2 p3 p4 p5 p6 p7 s3 s4 s5 z1 z1 z1 p8"));
        assert_eq!(waits, vec![Tile(TP, 2), Tile(TP, 5), Tile(TP, 8)]);
        assert!(is_furiten(
            &table("p2 p3 p4 p5 p6 p7 s3 s4 s5 z1 z1 z1 p8"),
            &[Tile(TP, 5)]
        ));
        assert!(!is_tenpai(&table("p1 p4 p7 s1 s4 s7 z1 z2 z3 z4 z5 z6 m1")));
    }

    #[test]
    fn test_joker_targets() {
        // 白ポッチが s9 に化けて s7s8s9 を完成させる
        let tt = table("p1 p2 p3 p4 p5 p6 s7 s8 z5 z1 z1 z1 m9 m9");
        assert_eq!(calc_joker_targets(&tt), vec![Tile(TS, 6), Tile(TS, 9)]);
    }
}
