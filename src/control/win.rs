use super::pao::find_liability;
use crate::hand::*;
use crate::model::*;

// ツモ和了の評価 joker: 白ポッチの変化先
pub fn evaluate_tsumo(stg: &Stage, seat: Seat, joker: Option<Tile>) -> Option<WinContext> {
    let pl = &stg.players[seat];
    let drawn = pl.drawn?;
    let flags = YakuFlags {
        haiteiraoyue: stg.wall.remaining() == 0 && !pl.is_rinshan,
        rinshankaihou: pl.is_rinshan,
        tenhou: stg.is_dealer(seat) && pl.is_first_turn,
        tiihou: !stg.is_dealer(seat) && pl.is_first_turn,
        ..riichi_flags(stg, seat)
    };
    let cond = win_condition(stg, seat, true, flags);
    let mut ctx = evaluate_hand(&pl.concealed(), &pl.melds, drawn.tile, joker, &cond)?;
    ctx.seat = seat;
    ctx.pao = find_pao(&pl.melds, &ctx);
    Some(ctx)
}

// ロン和了(槍槓を含む)の評価 白ポッチは使用不可
pub fn evaluate_ron(stg: &Stage, seat: Seat) -> Option<WinContext> {
    let pl = &stg.players[seat];
    let lt = stg.last_tile?;
    if lt.seat == seat {
        return None;
    }
    let oshidashi = lt.kind == LastTileKind::Discard
        && pl.is_open_riichi
        && stg.players[lt.seat]
            .discards
            .last()
            .map_or(false, |d| d.is_oshidashi);
    let flags = YakuFlags {
        houteiraoyui: stg.wall.remaining() == 0 && lt.kind == LastTileKind::Discard,
        chankan: lt.kind == LastTileKind::Kakan,
        renhou: !stg.is_dealer(seat) && pl.is_first_turn,
        oshidashi,
        ..riichi_flags(stg, seat)
    };
    let cond = win_condition(stg, seat, false, flags);
    let mut hand = pl.hand.clone();
    hand.push(lt.tile);
    let mut ctx = evaluate_hand(&hand, &pl.melds, lt.tile.tile, None, &cond)?;
    ctx.seat = seat;
    ctx.from = Some(lt.seat);
    ctx.pao = find_pao(&pl.melds, &ctx);
    Some(ctx)
}

fn riichi_flags(stg: &Stage, seat: Seat) -> YakuFlags {
    let pl = &stg.players[seat];
    YakuFlags {
        riichi: pl.is_riichi,
        dabururiichi: pl.is_double_riichi,
        open_riichi: pl.is_open_riichi,
        ippatsu: stg.is_ippatsu(seat),
        ..Default::default()
    }
}

fn win_condition(stg: &Stage, seat: Seat, is_drawn: bool, yaku_flags: YakuFlags) -> WinCondition {
    let pl = &stg.players[seat];
    WinCondition {
        doras: stg.wall.doras(),
        ura_doras: if pl.is_riichi {
            stg.wall.ura_doras()
        } else {
            vec![]
        },
        is_drawn,
        is_dealer: stg.is_dealer(seat),
        prevalent_wind: stg.get_prevalent_wind(),
        seat_wind: stg.get_seat_wind(seat),
        honba: stg.honba,
        honba_bonus: stg.rule.honba_bonus,
        yaku_flags,
    }
}

fn find_pao(melds: &[Meld], ctx: &WinContext) -> Option<Seat> {
    let (seat, name) = find_liability(melds)?;
    if ctx.yakus.iter().any(|(n, _)| n == name) {
        Some(seat)
    } else {
        None
    }
}

// 和了による点数移動 (供託を含む)
pub fn calc_win_deltas(stg: &Stage, ctx: &WinContext) -> [Point; SEAT] {
    let mut d = [0; SEAT];
    let w = ctx.seat;
    match (ctx.from, ctx.pao) {
        (None, Some(pao)) => {
            d[pao] -= ctx.score;
        }
        (None, None) => {
            for s in 0..SEAT {
                if s == w {
                    continue;
                }
                d[s] -= if !stg.is_dealer(w) && stg.is_dealer(s) {
                    ctx.points.2
                } else {
                    ctx.points.1
                };
            }
        }
        (Some(from), Some(pao)) => {
            let half = ctx.score / 2;
            d[from] -= half;
            d[pao] -= ctx.score - half;
        }
        (Some(from), None) => {
            d[from] -= ctx.points.0;
        }
    }
    d[w] = -d.iter().sum::<Point>();
    d[w] += stg.kyotaku as Point * stg.rule.riichi_cost;
    d
}
