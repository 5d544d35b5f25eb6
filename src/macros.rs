/// Shorthand for building an [`Entry`](crate::Entry) out of anything `Into<String>`
#[macro_export]
macro_rules! entry {
    ( $key: expr, $value: expr) => {
        $crate::Entry {
            key: $key.into(),
            value: $value.into(),
        }
    };
}

#[cfg(test)]
mod test {
    use crate::Entry;

    #[test]
    fn entry_from_mixed_types() {
        let key = String::from("mixed.example");
        let e = entry!(key, "10.9.8.7");
        assert_eq!(
            e,
            Entry {
                key: "mixed.example".into(),
                value: "10.9.8.7".into(),
            }
        );
        assert_ne!(e, entry!("mixed.example", String::from("10.9.8.6")));
    }
}
