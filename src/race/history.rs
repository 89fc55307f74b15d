//! 历史记录
//!
//! 只追加的四条平行时间序列，每个活跃步一个采样。

/// 单个采样
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub distance: f64,
    pub speed: f64,
    pub acceleration: f64,
    pub stamina: f64,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    distance: Vec<f64>,
    speed: Vec<f64>,
    acceleration: Vec<f64>,
    stamina: Vec<f64>,
}

impl History {
    pub(crate) fn record(&mut self, s: Sample) {
        self.distance.push(s.distance);
        self.speed.push(s.speed);
        self.acceleration.push(s.acceleration);
        self.stamina.push(s.stamina);
    }

    /// 采样数 = 参与过的仿真步数
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    pub fn distance(&self) -> &[f64] {
        &self.distance
    }

    pub fn speed(&self) -> &[f64] {
        &self.speed
    }

    pub fn acceleration(&self) -> &[f64] {
        &self.acceleration
    }

    pub fn stamina(&self) -> &[f64] {
        &self.stamina
    }

    pub fn get(&self, i: usize) -> Option<Sample> {
        Some(Sample {
            distance: *self.distance.get(i)?,
            speed: self.speed[i],
            acceleration: self.acceleration[i],
            stamina: self.stamina[i],
        })
    }

    pub fn last(&self) -> Option<Sample> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }
}
