use std::str::FromStr;

use serde::{de, ser};

use super::*;
use crate::util::error::Error;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)
pub const Z8: Tile = Tile(TZ, FL); // 華牌

// 三麻で使用する27種 (萬子は1,9のみ)
pub const LEGAL_TILES: [Tile; 27] = [
    Tile(TM, 1),
    Tile(TM, 9),
    Tile(TP, 1),
    Tile(TP, 2),
    Tile(TP, 3),
    Tile(TP, 4),
    Tile(TP, 5),
    Tile(TP, 6),
    Tile(TP, 7),
    Tile(TP, 8),
    Tile(TP, 9),
    Tile(TS, 1),
    Tile(TS, 2),
    Tile(TS, 3),
    Tile(TS, 4),
    Tile(TS, 5),
    Tile(TS, 6),
    Tile(TS, 7),
    Tile(TS, 8),
    Tile(TS, 9),
    Tile(TZ, WE),
    Tile(TZ, WS),
    Tile(TZ, WW),
    Tile(TZ, WN),
    Tile(TZ, DW),
    Tile(TZ, DG),
    Tile(TZ, DR),
];

impl Tile {
    pub fn from_symbol(s: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidTile(s.to_string());
        if s == "f" {
            return Ok(Z8);
        }
        let mut chars = s.chars();
        let (c0, c1) = match (chars.next(), chars.next(), chars.next()) {
            (Some(c0), Some(c1), None) => (c0, c1),
            _ => return Err(invalid()),
        };
        let ti = match c0 {
            'm' => TM,
            'p' => TP,
            's' => TS,
            'z' => TZ,
            _ => return Err(invalid()),
        };
        let ni = c1.to_digit(10).ok_or_else(invalid)? as usize;
        let t = Tile(ti, ni);
        if !t.is_legal() {
            return Err(invalid());
        }
        Ok(t)
    }

    // 三麻に存在する牌(華牌を除く)
    #[inline]
    pub fn is_legal(&self) -> bool {
        match self.0 {
            TM => self.1 == 1 || self.1 == 9,
            TP | TS => (1..=9).contains(&self.1),
            TZ => (WE..=DR).contains(&self.1),
            _ => false,
        }
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_honor(&self) -> bool {
        self.0 == TZ && self.1 <= DR
    }

    // 1,9牌
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.is_honor() || self.is_terminal()
    }

    // 中張牌
    #[inline]
    pub fn is_simple(&self) -> bool {
        self.is_suit() && !self.is_end()
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && (WE..=WN).contains(&self.1)
    }

    // 三元牌
    #[inline]
    pub fn is_doragon(&self) -> bool {
        self.0 == TZ && (DW..=DR).contains(&self.1)
    }

    // 華牌
    #[inline]
    pub fn is_flower(&self) -> bool {
        *self == Z8
    }

    // 緑一色の構成牌
    #[inline]
    pub fn is_green(&self) -> bool {
        match self.0 {
            TS => matches!(self.1, 2 | 3 | 4 | 6 | 8),
            TZ => self.1 == DG,
            _ => false,
        }
    }

    // ドラ表示牌から次の牌(ドラ)を返却. 華牌の表示はドラなし
    pub fn dora_successor(&self) -> Option<Tile> {
        if self.is_flower() {
            return None;
        }
        let n = match self.0 {
            TM => {
                if self.1 == 1 {
                    9
                } else {
                    1
                }
            }
            TP | TS => self.1 % 9 + 1,
            _ => {
                if self.is_wind() {
                    self.1 % 4 + 1
                } else {
                    (self.1 - DW + 1) % 3 + DW
                }
            }
        };
        Some(Tile(self.0, n))
    }
}

impl FromStr for Tile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tile::from_symbol(s)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_flower() {
            return write!(f, "f");
        }
        write!(f, "{}{}", ['m', 'p', 's', 'z'][self.0], self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [Flower]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Flower {
    Spring, // 春 (金)
    Summer, // 夏
    Autumn, // 秋
    Winter, // 冬
}

// [TileInstance]
// 山に積まれる牌1枚. idは局を通して一意
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileInstance {
    pub id: TileId,
    pub tile: Tile,
    pub is_red: bool,   // 赤ドラ (5p, 5sはすべて赤)
    pub is_gold: bool,  // 金牌 (祝儀対象)
    pub is_joker: bool, // 白ポッチ
    pub flower: Option<Flower>,
}

impl TileInstance {
    #[inline]
    pub fn is_flower(&self) -> bool {
        self.flower.is_some()
    }
}

impl PartialOrd for TileInstance {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TileInstance {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.tile.cmp(&other.tile).then(self.id.cmp(&other.id))
    }
}

impl fmt::Display for TileInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fl) = self.flower {
            return write!(f, "f{}", fl as usize + 1);
        }
        write!(f, "{}", self.tile)?;
        if self.is_gold {
            write!(f, "g")
        } else if self.is_red {
            write!(f, "r")
        } else if self.is_joker {
            write!(f, "j")
        } else {
            Ok(())
        }
    }
}

// 112枚の牌を生成. id順に (27種 x 4枚) + 華牌4枚
pub fn create_tiles() -> Vec<TileInstance> {
    let mut tiles = Vec::with_capacity(TILE_COUNT);
    for &t in &LEGAL_TILES {
        for c in 0..TILE {
            let is_five = t.is_suit() && t.0 != TM && t.1 == 5;
            tiles.push(TileInstance {
                id: tiles.len(),
                tile: t,
                is_red: is_five,
                is_gold: is_five && c == 0,
                is_joker: t == Tile(TZ, DW) && c == 0,
                flower: None,
            });
        }
    }
    for fl in [Flower::Spring, Flower::Summer, Flower::Autumn, Flower::Winter] {
        tiles.push(TileInstance {
            id: tiles.len(),
            tile: Z8,
            is_red: false,
            is_gold: fl == Flower::Spring,
            is_joker: false,
            flower: Some(fl),
        });
    }
    tiles
}

// [TileTable]
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

pub fn tiles_to_table<'a, I>(tiles: I) -> TileTable
where
    I: IntoIterator<Item = &'a TileInstance>,
{
    let mut tt = TileTable::default();
    for t in tiles {
        if !t.is_flower() {
            tt[t.tile.0][t.tile.1] += 1;
        }
    }
    tt
}

pub fn symbols_to_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for t in tiles {
        tt[t.0][t.1] += 1;
    }
    tt
}

pub fn table_to_tiles(tt: &TileTable) -> Vec<Tile> {
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            for _ in 0..tt[ti][ni] {
                res.push(Tile(ti, ni));
            }
        }
    }
    res
}

#[inline]
pub fn count_table(tt: &TileTable) -> usize {
    tt.iter().map(|r| r.iter().sum::<usize>()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dora_successor() {
        let cases = [
            ("m1", "m9"),
            ("m9", "m1"),
            ("p9", "p1"),
            ("s4", "s5"),
            ("z4", "z1"),
            ("z3", "z4"),
            ("z7", "z5"),
            ("z5", "z6"),
        ];
        for (ind, dora) in cases {
            let t: Tile = ind.parse().unwrap();
            assert_eq!(t.dora_successor().unwrap().to_string(), dora);
        }
        assert_eq!(Z8.dora_successor(), None);
    }

    #[test]
    fn test_create_tiles() {
        let tiles = create_tiles();
        assert_eq!(tiles.len(), TILE_COUNT);
        for (i, t) in tiles.iter().enumerate() {
            assert_eq!(t.id, i);
        }
        assert_eq!(tiles.iter().filter(|t| t.is_red).count(), 8);
        assert_eq!(tiles.iter().filter(|t| t.is_gold).count(), 3);
        assert_eq!(tiles.iter().filter(|t| t.is_joker).count(), 1);
        assert_eq!(tiles.iter().filter(|t| t.is_flower()).count(), FLOWER);
        assert!(tiles[TILE_COUNT - FLOWER].is_gold);
    }

    #[test]
    fn test_symbol() {
        assert!(Tile::from_symbol("m5").is_err());
        assert!(Tile::from_symbol("z8").is_err());
        assert!(Tile::from_symbol("p").is_err());
        assert_eq!(Tile::from_symbol("f").unwrap(), Z8);
        let json = serde_json::to_string(&Tile(TP, 3)).unwrap();
        assert_eq!(json, "\"p3\"");
        let t: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(t, Tile(TP, 3));
    }
}
