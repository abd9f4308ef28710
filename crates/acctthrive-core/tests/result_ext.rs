// SPDX-License-Identifier: Apache-2.0

use acctthrive_core::ResultExt;

#[test]
fn result_ext_attaches_static_context_without_allocation() {
    let r: Result<(), &str> = Err("bad");
    let err = r.with_context("load ledger state").expect_err("must error");
    assert_eq!(err.context, "load ledger state");
    assert_eq!(err.source, "bad");
    assert_eq!(err.to_string(), "load ledger state: bad");
}
