use super::{Formatter, Params, ToSql};

pub(super) struct Ident<S>(pub(super) S);

/// True when the identifier can be emitted bare. Anything else is wrapped in
/// the flavor's quote character.
fn is_bare(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let name = self.0.as_ref();

        if is_bare(name) {
            f.dst.push_str(name);
        } else {
            let quote = f.serializer.flavor.quote();
            f.dst.push(quote);
            for c in name.chars() {
                f.dst.push(c);
                if c == quote {
                    f.dst.push(quote);
                }
            }
            f.dst.push(quote);
        }
    }
}
