use is2500_core::{Attribute, CallVerdict, LotVerdict, Verdict};

/// Folds per-attribute verdicts into the lot decision. Rejection
/// dominates; acceptance requires a non-empty set with every attribute
/// accepted; anything else is pending.
pub fn lot_verdict<I>(verdicts: I) -> LotVerdict
where
    I: IntoIterator<Item = (Attribute, Verdict)>,
{
    let mut seen = 0usize;
    let mut accepted = 0usize;
    for (_, verdict) in verdicts {
        if verdict == Verdict::Rejected {
            return LotVerdict::Rejected;
        }
        seen += 1;
        if verdict == Verdict::Accepted {
            accepted += 1;
        }
    }
    if seen > 0 && accepted == seen {
        LotVerdict::Accepted
    } else {
        LotVerdict::Pending
    }
}

/// Folds per-lot verdicts into the inspection-call summary: all
/// accepted, all rejected, a decided mix, or still pending.
pub fn call_verdict<I>(lots: I) -> CallVerdict
where
    I: IntoIterator<Item = LotVerdict>,
{
    let mut seen = 0usize;
    let mut accepted = 0usize;
    let mut rejected = 0usize;
    for lot in lots {
        seen += 1;
        match lot {
            LotVerdict::Accepted => accepted += 1,
            LotVerdict::Rejected => rejected += 1,
            LotVerdict::Pending => {}
        }
    }
    if seen == 0 || accepted + rejected < seen {
        return CallVerdict::Pending;
    }
    if rejected == 0 {
        CallVerdict::Accepted
    } else if accepted == 0 {
        CallVerdict::Rejected
    } else {
        CallVerdict::PartiallyAccepted
    }
}
