use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::log::logger::{Logger, LoggerConfig};

/// LoggerManager 配置
///
/// 用于统一管理多个 Logger 实例
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct LoggerManagerConfig {
    /// 全局默认配置（未配置时使用默认值）
    pub default: LoggerConfig,

    /// 命名 logger 配置映射
    pub loggers: HashMap<String, LoggerConfig>,
}

/// Logger 管理器
///
/// 负责维护一组命名 Logger 和一个默认 Logger
pub struct LoggerManager {
    pub(crate) loggers: Arc<RwLock<HashMap<String, Arc<Logger>>>>,
    default: Arc<RwLock<Arc<Logger>>>,
}

impl LoggerManager {
    /// 从配置创建 LoggerManager
    ///
    /// 先创建所有 Create 模式的 logger，再解析 Reference 模式的引用，
    /// 保证引用可以指向同一份配置里声明的实例。
    pub fn new(config: LoggerManagerConfig) -> Result<Self> {
        let mut loggers_map = HashMap::new();
        let mut reference_configs: Vec<(String, String)> = Vec::new();

        for (key, logger_config) in &config.loggers {
            match logger_config {
                LoggerConfig::Reference { instance } => {
                    reference_configs.push((key.clone(), instance.clone()));
                }
                LoggerConfig::Create(create_config) => {
                    let logger = Arc::new(Logger::new(create_config.clone())?);
                    loggers_map.insert(key.clone(), logger);
                }
            }
        }

        for (key, instance) in reference_configs {
            let logger = Self::resolve_by_name(&instance, &loggers_map)?;
            loggers_map.insert(key, logger);
        }

        let default_logger = match &config.default {
            LoggerConfig::Reference { instance } => Self::resolve_by_name(instance, &loggers_map)?,
            LoggerConfig::Create(create_config) => Arc::new(Logger::new(create_config.clone())?),
        };

        Ok(Self {
            loggers: Arc::new(RwLock::new(loggers_map)),
            default: Arc::new(RwLock::new(default_logger)),
        })
    }

    /// 根据名称解析 Logger：先查本配置已创建的，再查全局管理器
    fn resolve_by_name(
        instance: &str,
        created_loggers: &HashMap<String, Arc<Logger>>,
    ) -> Result<Arc<Logger>> {
        if let Some(logger) = created_loggers.get(instance) {
            return Ok(Arc::clone(logger));
        }
        if let Some(logger) = crate::log::get(instance) {
            return Ok(logger);
        }
        Err(anyhow::anyhow!(
            "logger instance '{}' not found (neither in current config nor in global manager)",
            instance
        ))
    }

    /// 获取指定 key 的 logger
    pub fn get(&self, key: &str) -> Option<Arc<Logger>> {
        let loggers = self.loggers.read().unwrap();
        loggers.get(key).cloned()
    }

    /// 获取指定 key 的 logger，不存在时返回默认 logger
    pub fn get_or_default(&self, key: &str) -> Arc<Logger> {
        self.get(key).unwrap_or_else(|| self.get_default())
    }

    /// 获取默认 logger
    pub fn get_default(&self) -> Arc<Logger> {
        let default = self.default.read().unwrap();
        Arc::clone(&default)
    }

    /// 设置默认 logger
    pub fn set_default(&self, logger: Arc<Logger>) {
        let mut default = self.default.write().unwrap();
        *default = logger;
    }

    /// 动态添加（或替换）logger
    pub fn add(&self, key: String, logger: Arc<Logger>) {
        let mut loggers = self.loggers.write().unwrap();
        loggers.insert(key, logger);
    }

    /// 检查指定 key 的 logger 是否存在
    pub fn contains(&self, key: &str) -> bool {
        let loggers = self.loggers.read().unwrap();
        loggers.contains_key(key)
    }

    /// 获取所有 logger 的 key 列表
    pub fn keys(&self) -> Vec<String> {
        let loggers = self.loggers.read().unwrap();
        loggers.keys().cloned().collect()
    }

    /// 移除指定 key 的 logger
    pub fn remove(&self, key: &str) -> Option<Arc<Logger>> {
        let mut loggers = self.loggers.write().unwrap();
        loggers.remove(key)
    }
}
