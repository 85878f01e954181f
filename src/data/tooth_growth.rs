//! Embedded copy of R's `datasets::ToothGrowth`.

use super::{Dataset, Dose, Observation, Supplement};

/// Lengths in R row order: `VC` rows first, then `OJ`; within each, ten
/// animals per dose in increasing dose order.
const VC_LEN: [[f64; 10]; 3] = [
    [4.2, 11.5, 7.3, 5.8, 6.4, 10.0, 11.2, 11.2, 5.2, 7.0],
    [16.5, 16.5, 15.2, 17.3, 22.5, 17.3, 13.6, 14.5, 18.8, 15.5],
    [23.6, 18.5, 33.9, 25.5, 26.4, 32.5, 26.7, 21.5, 23.3, 29.5],
];
const OJ_LEN: [[f64; 10]; 3] = [
    [15.2, 21.5, 17.6, 9.7, 14.5, 10.0, 8.2, 9.4, 16.5, 9.7],
    [19.7, 23.3, 23.6, 26.4, 20.0, 25.2, 25.8, 21.2, 14.5, 27.3],
    [25.5, 26.4, 22.4, 24.5, 24.8, 30.9, 26.4, 27.3, 29.4, 23.0],
];

impl Dataset {
    /// The 60 ToothGrowth observations, in the same row order as R.
    pub fn tooth_growth() -> Self {
        let observations = [(Supplement::VC, &VC_LEN), (Supplement::OJ, &OJ_LEN)]
            .into_iter()
            .flat_map(|(supp, blocks)| {
                Dose::ALL.into_iter().zip(blocks.iter()).flat_map(move |(dose, block)| {
                    block.iter().map(move |&len| Observation { len, supp, dose })
                })
            })
            .collect();
        Dataset::new(observations, "embedded")
    }
}
