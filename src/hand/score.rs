use crate::model::{Point, Points};

// 30符固定の点数表 (index = 翻数, 13以上は13)
const DEALER_RON: [Point; 14] = [
    0, 2000, 3000, 6000, 12000, 18000, 18000, 18000, 24000, 24000, 36000, 36000, 36000, 48000,
];
const DEALER_TSUMO: [Point; 14] = [
    0, 1000, 2000, 3000, 6000, 9000, 9000, 9000, 12000, 12000, 18000, 18000, 18000, 24000,
];
const CHILD_RON: [Point; 14] = [
    0, 1000, 2000, 4000, 8000, 12000, 12000, 12000, 16000, 16000, 24000, 24000, 24000, 32000,
];
// (親の支払い, 子の支払い)
const CHILD_TSUMO: [(Point, Point); 14] = [
    (0, 0),
    (1000, 1000),
    (1000, 1000),
    (3000, 1000),
    (5000, 3000),
    (8000, 4000),
    (8000, 4000),
    (8000, 4000),
    (10000, 6000),
    (10000, 6000),
    (16000, 8000),
    (16000, 8000),
    (16000, 8000),
    (20000, 12000),
];

pub fn get_score_title(fan: usize, yakuman: usize) -> String {
    match yakuman {
        0 => match fan {
            0..=3 => return format!("{}翻", fan),
            4 | 5 => "満貫",
            6 | 7 => "跳満",
            8 | 9 => "倍満",
            10..=12 => "三倍満",
            _ => "数え役満",
        },
        1 => "役満",
        2 => "二倍役満",
        3 => "三倍役満",
        4 => "四倍役満",
        5 => "五倍役満",
        6 => "六倍役満",
        _ => "N倍役満",
    }
    .to_string()
}

// 点数表の値 (積み棒なし) を返却
// 親: (ロン, ツモ・子の支払い, 0), 子: (ロン, ツモ・子の支払い, ツモ・親の支払い)
pub fn get_base_points(is_dealer: bool, fan: usize, yakuman: usize) -> Points {
    let m = yakuman as Point;
    if yakuman > 0 {
        return if is_dealer {
            (48000 * m, 24000 * m, 0)
        } else {
            (32000 * m, 12000 * m, 20000 * m)
        };
    }

    let i = fan.min(13);
    if is_dealer {
        (DEALER_RON[i], DEALER_TSUMO[i], 0)
    } else {
        (CHILD_RON[i], CHILD_TSUMO[i].1, CHILD_TSUMO[i].0)
    }
}

// 積み棒を加算した支払いと和了得点,タイトルを返却
// 積み棒はロンの支払いとツモの各支払者にそれぞれ honba_bonus * honba を加算
pub fn calc_points(
    is_dealer: bool,
    is_drawn: bool,
    fan: usize,
    yakuman: usize,
    honba: usize,
    honba_bonus: Point,
) -> (Points, Point, String) {
    let (ron, child, dealer) = get_base_points(is_dealer, fan, yakuman);
    let bonus = honba_bonus * honba as Point;
    let points = if is_dealer {
        (ron + bonus, child + bonus, 0)
    } else {
        (ron + bonus, child + bonus, dealer + bonus)
    };

    let total = if !is_drawn {
        points.0
    } else if is_dealer {
        points.1 * 2
    } else {
        points.1 + points.2
    };

    (points, total, get_score_title(fan, yakuman))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        // (翻, 親ロン, 親ツモ合計, 子ロン, 子ツモ合計)
        let table = [
            (1, 2000, 2000, 1000, 2000),
            (2, 3000, 4000, 2000, 2000),
            (3, 6000, 6000, 4000, 4000),
            (4, 12000, 12000, 8000, 8000),
            (5, 18000, 18000, 12000, 12000),
            (7, 18000, 18000, 12000, 12000),
            (8, 24000, 24000, 16000, 16000),
            (10, 36000, 36000, 24000, 24000),
            (13, 48000, 48000, 32000, 32000),
            (20, 48000, 48000, 32000, 32000),
        ];
        for (fan, dr, dt, cr, ct) in table {
            assert_eq!(calc_points(true, false, fan, 0, 0, 1000).1, dr);
            assert_eq!(calc_points(true, true, fan, 0, 0, 1000).1, dt);
            assert_eq!(calc_points(false, false, fan, 0, 0, 1000).1, cr);
            assert_eq!(calc_points(false, true, fan, 0, 0, 1000).1, ct);
        }
    }

    #[test]
    fn test_honba() {
        for fan in 1..=13 {
            let base = calc_points(false, false, fan, 0, 0, 1000).1;
            assert_eq!(calc_points(false, false, fan, 0, 1, 1000).1, base + 1000);
            let (p0, _, _) = calc_points(false, true, fan, 0, 0, 1000);
            let (p1, _, _) = calc_points(false, true, fan, 0, 2, 1000);
            assert_eq!(p1.1, p0.1 + 2000);
            assert_eq!(p1.2, p0.2 + 2000);
        }
    }

    #[test]
    fn test_yakuman() {
        let (p, total, title) = calc_points(false, true, 0, 2, 0, 1000);
        assert_eq!(p, (64000, 24000, 40000));
        assert_eq!(total, 64000);
        assert_eq!(title, "二倍役満");
        let (_, total, _) = calc_points(true, true, 0, 1, 0, 1000);
        assert_eq!(total, 48000);
    }
}
