//! 集合工具模块
//!
//! 提供字典反转、迭代器分批等集合工具。

use std::collections::HashMap;
use std::hash::Hash;

/// 反转 HashMap 的键值
///
/// 将 `{a: 1, b: 2}` 转换为 `{1: a, 2: b}`。
///
/// 如果多个键映射到同一个值，保留其中任意一个（与 HashMap 迭代顺序一致，
/// 调用方不应依赖具体哪个被保留）。
///
/// # 示例
///
/// ```
/// use std::collections::HashMap;
/// use utilx::collections::inverted;
///
/// let m: HashMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
/// let inv = inverted(&m);
/// assert_eq!(inv[&1], "a");
/// assert_eq!(inv[&2], "b");
/// ```
pub fn inverted<K, V>(map: &HashMap<K, V>) -> HashMap<V, K>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Hash,
{
    map.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
}

/// 将迭代器按固定大小分批
///
/// 返回一个迭代器，每次产出一个最多 `of_size` 个元素的 Vec，
/// 最后一批可能不足 `of_size` 个。
///
/// # Panics
///
/// `of_size` 为 0 时 panic（无法构成有意义的批次）。
///
/// # 示例
///
/// ```
/// use utilx::collections::in_batches;
///
/// let batches: Vec<Vec<i32>> = in_batches(0..10, 3).collect();
/// assert_eq!(batches, vec![
///     vec![0, 1, 2],
///     vec![3, 4, 5],
///     vec![6, 7, 8],
///     vec![9],
/// ]);
/// ```
pub fn in_batches<I>(iterable: I, of_size: usize) -> InBatches<I::IntoIter>
where
    I: IntoIterator,
{
    assert!(of_size > 0, "batch size must be greater than zero");
    InBatches {
        inner: iterable.into_iter(),
        of_size,
    }
}

/// `in_batches` 返回的分批迭代器
pub struct InBatches<I> {
    inner: I,
    of_size: usize,
}

impl<I> Iterator for InBatches<I>
where
    I: Iterator,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.of_size);
        for item in self.inner.by_ref() {
            batch.push(item);
            if batch.len() == self.of_size {
                return Some(batch);
            }
        }
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}
