// 类型注册表和工厂函数
//
// 为每个 trait 维护一张独立的名称 -> 构造函数表，
// 构造函数接收 TypeOptions.options 并反序列化出对应的 Config。

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use super::type_options::TypeOptions;

// 构造函数类型：返回值包装的是 Box<dyn Trait>。
// 用 Arc 保存，调用前可以先释放注册表锁，允许构造函数嵌套创建组件。
type TraitConstructor = Arc<dyn Fn(JsonValue) -> Result<Box<dyn Any + Send + Sync>> + Send + Sync>;

// 外层 key 是 Box<dyn Trait> 的 TypeId，内层 key 是注册名称
static TRAIT_REGISTRY: Lazy<RwLock<HashMap<TypeId, HashMap<String, TraitConstructor>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 以指定名称注册一个 trait 实现
///
/// 要求实现类型能从 Config 转换（`impl_from!`），并且 `Box<T>` 能转换为
/// `Box<dyn Trait>`（`impl_box_from!`）。重复注册同名类型会覆盖旧的构造函数。
///
/// # 示例
///
/// ```ignore
/// register_trait::<TextFormatter, dyn LogFormatter, TextFormatterConfig>("TextFormatter")?;
/// ```
pub fn register_trait<T, Tr, Config>(type_name: &str) -> Result<()>
where
    T: From<Config> + Send + Sync + 'static,
    Tr: ?Sized + 'static,
    Box<Tr>: From<Box<T>> + Send + Sync,
    Config: DeserializeOwned + 'static,
{
    let constructor: TraitConstructor = Arc::new(|options| {
        // options 为 Null 时按空对象处理，允许配置省略 options 字段
        let options = if options.is_null() {
            JsonValue::Object(serde_json::Map::new())
        } else {
            options
        };
        let config: Config = serde_json::from_value(options)?;
        let instance: Box<Tr> = Box::new(T::from(config)).into();
        Ok(Box::new(instance) as Box<dyn Any + Send + Sync>)
    });

    let mut registry = TRAIT_REGISTRY
        .write()
        .map_err(|_| anyhow!("type registry lock poisoned"))?;
    registry
        .entry(TypeId::of::<Box<Tr>>())
        .or_default()
        .insert(type_name.to_string(), constructor);

    Ok(())
}

/// 根据 TypeOptions 构造 trait 对象
pub fn create_trait_from_type_options<Tr>(options: &TypeOptions) -> Result<Box<Tr>>
where
    Tr: ?Sized + 'static,
{
    let constructor = {
        let registry = TRAIT_REGISTRY
            .read()
            .map_err(|_| anyhow!("type registry lock poisoned"))?;

        let constructors = registry.get(&TypeId::of::<Box<Tr>>()).ok_or_else(|| {
            anyhow!(
                "no implementations registered for the requested trait (while creating '{}')",
                options.type_name
            )
        })?;

        constructors
            .get(&options.type_name)
            .ok_or_else(|| anyhow!("type '{}' is not registered", options.type_name))?
            .clone()
    };

    let instance = constructor(options.options.clone())?;
    instance
        .downcast::<Box<Tr>>()
        .map(|boxed| *boxed)
        .map_err(|_| anyhow!("registry returned unexpected type for '{}'", options.type_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    #[derive(Debug, Clone, Deserialize)]
    struct EnglishGreeterConfig {
        #[serde(default)]
        name: String,
    }

    struct EnglishGreeter {
        config: EnglishGreeterConfig,
    }

    impl EnglishGreeter {
        fn new(config: EnglishGreeterConfig) -> Self {
            Self { config }
        }
    }

    impl Greeter for EnglishGreeter {
        fn greet(&self) -> String {
            format!("hello, {}", self.config.name)
        }
    }

    crate::impl_from!(EnglishGreeterConfig => EnglishGreeter);
    crate::impl_box_from!(EnglishGreeter => dyn Greeter);

    #[test]
    fn test_register_and_create() -> Result<()> {
        register_trait::<EnglishGreeter, dyn Greeter, EnglishGreeterConfig>("EnglishGreeter")?;

        let opts = TypeOptions::from_json(
            r#"{ type: "EnglishGreeter", options: { name: "alice" } }"#,
        )?;
        let greeter: Box<dyn Greeter> = create_trait_from_type_options(&opts)?;

        assert_eq!(greeter.greet(), "hello, alice");
        Ok(())
    }

    #[test]
    fn test_create_with_null_options() -> Result<()> {
        register_trait::<EnglishGreeter, dyn Greeter, EnglishGreeterConfig>("DefaultGreeter")?;

        let opts = TypeOptions::from_json(r#"{ type: "DefaultGreeter" }"#)?;
        let greeter: Box<dyn Greeter> = create_trait_from_type_options(&opts)?;

        assert_eq!(greeter.greet(), "hello, ");
        Ok(())
    }

    #[test]
    fn test_create_unknown_type() {
        let opts = TypeOptions {
            type_name: "NoSuchGreeter".to_string(),
            options: serde_json::Value::Null,
        };

        // 至少注册过一个 Greeter 之后，未知名称应该报"类型未注册"
        register_trait::<EnglishGreeter, dyn Greeter, EnglishGreeterConfig>("EnglishGreeter")
            .unwrap();
        let result = create_trait_from_type_options::<dyn Greeter>(&opts);
        assert!(result.is_err());
        assert!(result.err().unwrap().to_string().contains("not registered"));
    }

    #[test]
    fn test_create_invalid_options() {
        register_trait::<EnglishGreeter, dyn Greeter, EnglishGreeterConfig>("EnglishGreeter")
            .unwrap();

        let opts = TypeOptions {
            type_name: "EnglishGreeter".to_string(),
            options: serde_json::json!({"name": 42}),
        };

        assert!(create_trait_from_type_options::<dyn Greeter>(&opts).is_err());
    }
}
