use std::fmt;

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

// 最も数字の大きい値のindexから順に格納した配列を返却
// 同じ値が複数ある場合, tie_keyが小さい要素が先になる
pub fn rank_by_index_vec<T: Ord>(v: &[T], tie_key: impl Fn(usize) -> usize) -> Vec<usize> {
    let mut i_n: Vec<(usize, &T)> = v.iter().enumerate().collect();
    i_n.sort_by(|a, b| b.1.cmp(a.1).then(tie_key(a.0).cmp(&tie_key(b.0))));
    i_n.iter().map(|e| e.0).collect()
}
