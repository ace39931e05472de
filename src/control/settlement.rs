use crate::model::*;
use crate::util::misc::rank_by_index_vec;

// 起家
const FIRST_DEALER: Seat = 0;

// [精算]
// 順位順の精算結果を返却 同点の場合は起家に近い方が上位
pub fn calc_settlement(stg: &Stage) -> Vec<SettlementEntry> {
    let rule = &stg.rule;
    let scores = stg.get_scores();
    let order = rank_by_index_vec(&scores, |i| (i + SEAT - FIRST_DEALER) % SEAT);

    let uma = if scores[order[1]] > rule.settlement_score {
        [30.0, 10.0, -40.0]
    } else {
        [40.0, -10.0, -30.0]
    };

    order
        .iter()
        .enumerate()
        .map(|(rank, &seat)| {
            let pl = &stg.players[seat];
            let raw = (pl.score - rule.settlement_score) as f64 / 1000.0;
            let chip_pt = (pl.chips * rule.chip_value) as f64;
            SettlementEntry {
                seat,
                rank,
                score: pl.score,
                raw,
                uma: uma[rank],
                chips: pl.chips,
                total: raw + uma[rank] + chip_pt,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement() {
        let mut stg = Stage::new(["a", "b", "c"], Rule::default());
        for (s, (score, chips)) in [(40000, 0), (62000, 3), (48000, -3)].iter().enumerate() {
            stg.players[s].score = *score;
            stg.players[s].chips = *chips;
        }
        let res = calc_settlement(&stg);
        assert_eq!(res.iter().map(|e| e.seat).collect::<Vec<_>>(), vec![1, 2, 0]);
        // 2着が返し点未満
        assert_eq!(res[0].uma, 40.0);
        assert_eq!(res[0].total, 12.0 + 40.0 + 15.0);
        assert_eq!(res[1].total, -2.0 - 10.0 - 15.0);
        assert_eq!(res[2].total, -10.0 - 30.0);
        let sum: f64 = res.iter().map(|e| e.total).sum();
        assert_eq!(sum, 0.0);
    }

    #[test]
    fn test_tie() {
        let mut stg = Stage::new(["a", "b", "c"], Rule::default());
        stg.players[0].score = 45000;
        stg.players[1].score = 52500;
        stg.players[2].score = 52500;
        let res = calc_settlement(&stg);
        assert_eq!(res[0].seat, 1);
        assert_eq!(res[1].seat, 2);
        assert_eq!(res[0].uma, 30.0);
        assert_eq!(res[1].raw, 2.5);
    }
}
