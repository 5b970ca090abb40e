//! ON/OFF clip authoring.
//!
//! A clip maps targets to constant curves: one sample at time 0 whose value
//! holds for the whole clip. A target missing from a clip is unmanaged; a
//! zero-valued curve is not the same thing.

use serde::{Deserialize, Serialize};

use crate::target::{AnimationTarget, TargetSet};

pub const SHOWN: f32 = 1.0;
pub const HIDDEN: f32 = 0.0;

/// Single-sample curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantCurve {
    pub time: f32,
    pub value: f32,
}

impl ConstantCurve {
    pub fn new(value: f32) -> Self {
        Self { time: 0.0, value }
    }

    /// Constant curves evaluate to their single value everywhere.
    #[inline]
    pub fn sample(&self, _t: f32) -> f32 {
        self.value
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveBinding {
    pub target: AnimationTarget,
    pub curve: ConstantCurve,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub name: String,
    pub curves: Vec<CurveBinding>,
}

impl Clip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            curves: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.curves.clear();
    }

    /// Insert or replace the curve for `target`.
    pub fn set_curve(&mut self, target: AnimationTarget, curve: ConstantCurve) {
        if let Some(row) = self.curves.iter_mut().find(|r| r.target == target) {
            row.curve = curve;
        } else {
            self.curves.push(CurveBinding { target, curve });
        }
    }

    pub fn curve(&self, target: &AnimationTarget) -> Option<&ConstantCurve> {
        self.curves
            .iter()
            .find(|r| &r.target == target)
            .map(|r| &r.curve)
    }

    pub fn value(&self, target: &AnimationTarget) -> Option<f32> {
        self.curve(target).map(|c| c.value)
    }

    pub fn targets(&self) -> impl Iterator<Item = &AnimationTarget> {
        self.curves.iter().map(|r| &r.target)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipPair {
    pub on: Clip,
    pub off: Clip,
}

impl Default for ClipPair {
    fn default() -> Self {
        Self {
            on: Clip::new("ON"),
            off: Clip::new("OFF"),
        }
    }
}

impl ClipPair {
    /// Clip of the state the machine starts in.
    pub fn entry_clip(&self, default_state: bool) -> &Clip {
        if default_state {
            &self.on
        } else {
            &self.off
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ClipAuthor;

impl ClipAuthor {
    pub fn new() -> Self {
        Self
    }

    /// Replace whatever `clips` held with one constant curve per target:
    /// shown in `on`, hidden in `off`.
    pub fn author(&self, targets: &TargetSet, clips: &mut ClipPair) {
        clips.on.clear();
        clips.off.clear();
        // `TargetSet` is unique; append without lookup
        clips.on.curves.reserve(targets.len());
        clips.off.curves.reserve(targets.len());
        for target in targets {
            clips.on.curves.push(CurveBinding {
                target: target.clone(),
                curve: ConstantCurve::new(SHOWN),
            });
            clips.off.curves.push(CurveBinding {
                target: target.clone(),
                curve: ConstantCurve::new(HIDDEN),
            });
        }
        log::debug!(
            "autoggle: authored {} curve(s) into '{}'/'{}'",
            targets.len(),
            clips.on.name,
            clips.off.name
        );
    }

    pub fn author_new(&self, targets: &TargetSet) -> ClipPair {
        let mut clips = ClipPair::default();
        self.author(targets, &mut clips);
        clips
    }
}
