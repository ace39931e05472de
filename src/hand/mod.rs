// 手牌の和了判定,役や点数計算を行うモジュール
mod evaluate;
mod parse;
mod score;
mod win;
mod yaku;

pub use self::{
    evaluate::{evaluate_hand, WinCondition},
    parse::{enumerate_decompositions, parse_melds, ParsedHand, SetPair, SetPairType},
    score::{calc_points, get_base_points, get_score_title},
    win::{
        calc_discards_to_tenpai, calc_joker_targets, calc_waiting_tiles, is_chiitoitsu_win,
        is_complete, is_furiten, is_kokushimusou_win, is_normal_win, is_tenpai,
    },
    yaku::{YakuContext, YakuFlags},
};
