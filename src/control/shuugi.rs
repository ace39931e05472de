use crate::model::*;

// 飛ばした和了者に支払う祝儀
pub const BUST_CHIPS: i32 = 2;

// [祝儀]
// 和了時の祝儀枚数 (ツモの場合は1人あたり, ロンの場合は放銃者の支払い)
// 和了処理前の局面で呼び出すこと (一発,ドラ表示牌を参照するため)
pub fn calc_chips(stg: &Stage, ctx: &WinContext) -> i32 {
    let pl = &stg.players[ctx.seat];
    let is_tsumo = ctx.from.is_none();

    let mut tiles = pl.all_instances();
    if !is_tsumo {
        if let Some(lt) = stg.last_tile {
            tiles.push(lt.tile);
        }
    }

    let mut n = 0;
    if pl.is_riichi && stg.is_ippatsu(ctx.seat) {
        n += 1;
    }

    if pl.is_riichi {
        let uras = stg.wall.ura_doras();
        if let Some((ura, kan_uras)) = uras.split_first() {
            if tiles.iter().any(|t| t.tile == *ura) {
                n += 1;
            }
            if tiles.iter().any(|t| kan_uras.contains(&t.tile)) {
                n += 1;
            }
        }
    }

    let n_gold = tiles.iter().chain(pl.flowers.iter()).filter(|t| t.is_gold).count() as i32;
    if n_gold >= 3 {
        // 金オールスター 通常の金牌祝儀とは複合しない
        n += 5;
    } else {
        n += n_gold;
    }

    if tiles.iter().any(|t| t.is_joker) {
        n += 1;
    }

    if ctx.yakuman == 0 && ctx.fan > 13 {
        n += (ctx.fan - 13) as i32;
    }

    if ctx.yakuman > 0 {
        n += ctx.yakuman as i32 * if is_tsumo { 5 } else { 10 };
    }

    if pl.flowers.len() == FLOWER {
        n += if is_tsumo { 5 } else { 10 };
    }

    n
}

// 祝儀の移動 (飛び祝儀を含む)
// scores: 和了の点数移動を反映した後の持ち点
pub fn calc_chip_deltas(
    stg: &Stage,
    ctx: &WinContext,
    chips: i32,
    scores: &[Score; SEAT],
) -> [i32; SEAT] {
    let mut d = [0; SEAT];
    let w = ctx.seat;
    match ctx.from {
        None => {
            for s in 0..SEAT {
                if s != w {
                    d[s] -= chips;
                    d[w] += chips;
                }
            }
        }
        Some(from) => {
            d[from] -= chips;
            d[w] += chips;
        }
    }

    if stg.rule.bust {
        for s in 0..SEAT {
            if s != w && scores[s] <= 0 && stg.players[s].score > 0 {
                d[s] -= BUST_CHIPS;
                d[w] += BUST_CHIPS;
            }
        }
    }
    d
}
