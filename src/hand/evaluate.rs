use super::parse::*;
use super::score::*;
use super::yaku::*;
use crate::model::*;

// 和了判定に必要な局面の情報
#[derive(Debug, Clone)]
pub struct WinCondition {
    pub doras: Vec<Tile>,     // ドラ (注:表示牌ではない)
    pub ura_doras: Vec<Tile>, // 裏ドラ リーチしていない場合は空
    pub is_drawn: bool,       // ツモ和了
    pub is_dealer: bool,      // 親番
    pub prevalent_wind: Tnum, // 場風
    pub seat_wind: Tnum,      // 自風
    pub honba: usize,         // 本場
    pub honba_bonus: Point,   // 積み棒1本あたりの加算
    pub yaku_flags: YakuFlags,
}

// 和了形である場合,最も高得点となるような役の組み合わせのSome(WinContext)を返却
// 和了形でない場合,または無役の場合はNoneを返却
// seat, from, pao, chipsは呼び出し側で設定する
pub fn evaluate_hand(
    hand: &[TileInstance], // 手牌(鳴き以外, ロンの場合でも和了牌を含む)
    melds: &[Meld],        // 鳴き
    winning_tile: Tile,    // 上がり牌
    joker: Option<Tile>,   // 白ポッチの変化先
    cond: &WinCondition,
) -> Option<WinContext> {
    let mut tiles: Vec<Tile> = hand.iter().map(|t| t.tile).collect();
    if let Some(j) = joker {
        let i = hand.iter().position(|t| t.is_joker)?;
        tiles[i] = j;
    }
    // 白ポッチ自身が和了牌の場合は変化先を和了牌とする
    let winning_tile = match joker {
        Some(j) if winning_tile == Tile(TZ, DW) && count_haku(hand) == 1 => j,
        _ => winning_tile,
    };
    let tt = symbols_to_table(&tiles);

    let n_dora = count_dora(&tiles, melds, &cond.doras);
    let n_ura_dora = count_dora(&tiles, melds, &cond.ura_doras);
    let n_red_dora = hand
        .iter()
        .chain(melds.iter().flat_map(|m| m.tiles.iter()))
        .filter(|t| t.is_red)
        .count();

    let mut best: Option<WinContext> = None;
    for ph in enumerate_decompositions(&tt, melds) {
        let ctx = YakuContext::new(
            tt,
            ph,
            winning_tile,
            cond.prevalent_wind,
            cond.seat_wind,
            cond.is_drawn,
            cond.yaku_flags,
        );
        let (yakus, mut yakuman, mut fan) = ctx.calc_yaku();
        if yakus.is_empty() {
            continue; // 無役
        }

        let mut yakus: Vec<(String, usize)> =
            yakus.iter().map(|&(n, f)| (n.to_string(), f)).collect();
        if yakuman == 0 {
            let n_total = n_dora + n_ura_dora + n_red_dora;
            if is_karasu(&yakus) && n_total == 0 {
                // カラス: 立直のみ(門前自摸は除く)でドラなしの場合は役満
                yakus = vec![("カラス".to_string(), 13)];
                yakuman = 1;
                fan = 0;
            } else {
                fan += n_total;
                for (name, n) in [("ドラ", n_dora), ("裏ドラ", n_ura_dora), ("赤ドラ", n_red_dora)] {
                    if n != 0 {
                        yakus.push((name.to_string(), n));
                    }
                }
            }
        }

        let (points, score, title) = calc_points(
            cond.is_dealer,
            cond.is_drawn,
            fan,
            yakuman,
            cond.honba,
            cond.honba_bonus,
        );

        // 同点の場合は先に見つかった分解を優先
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(WinContext {
                seat: NO_SEAT,
                from: None,
                hand: tiles.clone(),
                winning_tile,
                yakus,
                fan,
                yakuman,
                score,
                points,
                title,
                pao: None,
                chips: 0,
            });
        }
    }

    best
}

fn count_haku(hand: &[TileInstance]) -> usize {
    hand.iter().filter(|t| t.tile == Tile(TZ, DW)).count()
}

fn is_karasu(yakus: &[(String, usize)]) -> bool {
    let v: Vec<&str> = yakus
        .iter()
        .map(|y| y.0.as_str())
        .filter(|&n| n != "門前清自摸和")
        .collect();
    v == ["立直"]
}

// ドラの枚数 (槓子は4枚すべて数える)
fn count_dora(tiles: &[Tile], melds: &[Meld], doras: &[Tile]) -> usize {
    let mut n = 0;
    for d in doras {
        n += tiles.iter().filter(|t| *t == d).count();
        for m in melds {
            n += m.tiles.iter().filter(|t| t.tile == *d).count();
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    // 記号列から牌を生成 (同じ牌は別のidを割り当てる)
    fn instances(exp: &str) -> Vec<TileInstance> {
        let all = create_tiles();
        let mut used = vec![false; TILE_COUNT];
        let mut res = vec![];
        for s in exp.split_whitespace() {
            let t: Tile = s.parse().unwrap();
            // 赤,金,ポッチを避けて後ろのコピーから使う
            let i = (0..TILE_COUNT)
                .rev()
                .find(|&i| !used[i] && all[i].tile == t)
                .unwrap();
            used[i] = true;
            res.push(all[i]);
        }
        res
    }

    fn cond(is_drawn: bool, yaku_flags: YakuFlags) -> WinCondition {
        WinCondition {
            doras: vec![],
            ura_doras: vec![],
            is_drawn,
            is_dealer: false,
            prevalent_wind: WE,
            seat_wind: WS,
            honba: 0,
            honba_bonus: 1000,
            yaku_flags,
        }
    }

    #[test]
    fn test_karasu() {
        // 立直,門前自摸のみ,ドラなし -> 役満
        let hand = instances("p2 p3 p4 p6 p7 p8 s2 s3 s4 s6 s7 s8 z2 z2");
        let flags = YakuFlags {
            riichi: true,
            ..Default::default()
        };
        let ctx = evaluate_hand(&hand, &[], Tile(TP, 4), None, &cond(true, flags)).unwrap();
        assert_eq!(ctx.yakuman, 1);
        assert_eq!(ctx.yakus, vec![("カラス".to_string(), 13)]);
        assert_eq!(ctx.score, 32000);

        // ドラが1枚でもあれば通常の和了
        let mut c = cond(true, flags);
        c.doras = vec![Tile(TP, 2)];
        let ctx = evaluate_hand(&hand, &[], Tile(TP, 4), None, &c).unwrap();
        assert_eq!(ctx.yakuman, 0);
        assert_eq!(ctx.fan, 3);
    }

    #[test]
    fn test_no_yaku() {
        let hand = instances("p2 p3 p4 p6 p7 p8 s2 s3 s4 s6 s7 s8 z2 z2");
        assert!(evaluate_hand(&hand, &[], Tile(TP, 4), None, &cond(false, YakuFlags::default())).is_none());
        let hand = instances("p2 p3 p4 p6 p7 p8 s2 s3 s4 s6 s7 s8 z2 z3");
        assert!(evaluate_hand(&hand, &[], Tile(TP, 3), None, &cond(true, YakuFlags::default())).is_none());
    }

    #[test]
    fn test_red_dora() {
        // 5p, 5sはすべて赤
        let hand = instances("p4 p5 p6 s4 s5 s6 s6 s7 s8 p2 p3 p4 p8 p8");
        let ctx = evaluate_hand(&hand, &[], Tile(TP, 4), None, &cond(true, YakuFlags::default())).unwrap();
        // 門前自摸 + 平和 + 断幺九 + 赤2
        assert_eq!(ctx.fan, 5);
        assert!(ctx.yakus.contains(&("赤ドラ".to_string(), 2)));
    }

    #[test]
    fn test_joker() {
        let mut hand = instances("p1 p2 p3 p4 p5 p6 s7 s8 z1 z1 z1 m9 m9");
        hand.push(create_tiles()[24 * TILE]); // 白ポッチ
        assert!(hand.last().unwrap().is_joker);
        let ctx = evaluate_hand(&hand, &[], Tile(TZ, DW), Some(Tile(TS, 9)), &cond(true, YakuFlags::default())).unwrap();
        assert!(ctx.hand.contains(&Tile(TS, 9)));
        assert!(!ctx.hand.contains(&Tile(TZ, DW)));
        assert_eq!(ctx.winning_tile, Tile(TS, 9));
    }
}
