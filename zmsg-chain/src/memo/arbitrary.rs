use proptest::{collection::vec, prelude::*};

use super::{Memo, MEMO_SIZE};

impl Arbitrary for Memo {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        vec(any::<u8>(), MEMO_SIZE)
            .prop_map(|v| {
                let mut bytes = [0; MEMO_SIZE];
                bytes.copy_from_slice(v.as_slice());
                Memo(Box::new(bytes))
            })
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
