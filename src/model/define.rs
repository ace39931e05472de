// 型エイリアス
pub type Seat = usize; // 座席
pub type Type = usize; // 牌の種別部分 (萬子,筒子,索子,字牌)
pub type Tnum = usize; // 牌の数字部分 (1~9)
pub type Index = usize; // その他Index
pub type TileId = usize; // 牌インスタンスの通し番号 (0~111)
pub type Score = i32; // 持ち点
pub type Point = i32; // 点数の増減

// Number
pub const SEAT: usize = 3; // 座席の数
pub const TYPE: usize = 4; // 牌の種別部分の数 (萬子,筒子,索子,字牌)
pub const TNUM: usize = 10; // 牌の数字部分の数 (0は未使用, 1~9)
pub const TILE: usize = 4; // 同種の牌の数
pub const FLOWER: usize = 4; // 華牌の数
pub const TILE_COUNT: usize = 27 * TILE + FLOWER; // 牌の総数 (112)
pub const DEAD_WALL: usize = 14; // 王牌の枚数 (嶺上牌4 + ドラ表示牌10)
pub const DEAD_WALL_MIN: usize = 4; // 華牌抜き後の王牌の最小枚数
pub const REPLACEMENT: usize = 4; // 嶺上牌の枚数
pub const MAX_KAN: usize = 4; // 1局中の槓の最大回数
pub const NO_SEAT: Seat = usize::MAX; // 該当なし

// Type Index
pub const TM: usize = 0; // Type: Manzu (萬子)
pub const TP: usize = 1; // Type: Pinzu (筒子)
pub const TS: usize = 2; // Type: Souzu (索子)
pub const TZ: usize = 3; // Type: Zihai (字牌)

// Tnum Index
pub const WE: usize = 1; // Wind:    East  (東)
pub const WS: usize = 2; // Wind:    South (南)
pub const WW: usize = 3; // Wind:    West  (西)
pub const WN: usize = 4; // Wind:    North (北)
pub const DW: usize = 5; // Doragon: White (白)
pub const DG: usize = 6; // Doragon: Green (發)
pub const DR: usize = 7; // Doragon: Red   (中)
pub const FL: usize = 8; // Flower (華)
