use std::collections::HashMap;

/// Convert Delta partition values into partition keys.
///
/// Delta writes NULL partition values as empty strings.
pub fn to_partition_keys<'a, I>(partition_values: I) -> HashMap<String, Option<String>>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    partition_values
        .into_iter()
        .map(|(name, value)| {
            let value = (!value.is_empty()).then(|| value.clone());
            (name.clone(), value)
        })
        .collect()
}
